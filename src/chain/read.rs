//! 链式读取
//!
//! 逐个 chunk 调用底层 get，直到遇到非整块的 chunk。
//! 整块（恰好等于两种块大小之一）意味着后面可能还有数据。

use alloc::vec::Vec;

use crate::{
    backend::XattrBackend,
    config::ChainConfig,
    error::{Error, ErrorKind, Result},
};

use super::name::{raw_name, validate_name};

/// 只查询逻辑属性的总长度
///
/// chunk 0 上的错误原样返回（属性不存在或不可访问）；
/// 之后任何 chunk 的错误都视为链结束，返回已累计的长度。
pub fn getxattr_len<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
    name: &str,
) -> Result<usize> {
    config.validate()?;
    validate_name(config, name)?;
    chain_len(config, backend, name)
}

fn chain_len<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
    name: &str,
) -> Result<usize> {
    let mut total = 0;
    let mut index = 0;

    loop {
        let raw = raw_name(config, name, index)?;
        let len = match backend.get(&raw, &mut []) {
            Ok(len) => len,
            Err(err) if index == 0 => return Err(err),
            Err(_) => break,
        };

        log::trace!("[CHAIN] len probe {} -> {}", raw, len);
        total += len;
        index += 1;

        if !config.is_full_block(len) {
            break;
        }
    }

    Ok(total)
}

/// 读取逻辑属性值
///
/// # 参数
///
/// * `buf` - 目标缓冲区；为空时等价于 [`getxattr_len`]
///
/// # 返回
///
/// 成功返回写入的字节数。出错时 `buf` 的内容不可信。
///
/// # 错误
///
/// - 配置或名称不合法返回 `InvalidInput`，不会调用底层
/// - chunk 0 不存在返回 `NotFound`
/// - 缓冲区不足返回 `BufferTooSmall`，包括恰好在块边界截断、
///   但后面还有 chunk 的情况
pub fn getxattr<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
    name: &str,
    buf: &mut [u8],
) -> Result<usize> {
    config.validate()?;
    validate_name(config, name)?;
    read_chain(config, backend, name, buf)
}

fn read_chain<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
    name: &str,
    buf: &mut [u8],
) -> Result<usize> {
    if buf.is_empty() {
        return chain_len(config, backend, name);
    }

    let mut pos = 0;
    let mut index = 0;
    let mut last_len;

    loop {
        let raw = raw_name(config, name, index)?;
        match backend.get(&raw, &mut buf[pos..]) {
            Ok(len) => {
                log::trace!("[CHAIN] read {} -> {} bytes at {}", raw, len, pos);
                pos += len;
                last_len = len;
            }
            Err(err) if index > 0 && err.is_not_found() => {
                // 上一个 chunk 恰好是整块，链在这里结束
                return Ok(pos);
            }
            Err(err) => return Err(err),
        }
        index += 1;

        if pos == buf.len() || !config.is_full_block(last_len) {
            break;
        }
    }

    // 缓冲区刚好在块边界用完时，无法区分“值到此结束”和“还有下一个 chunk”
    if config.is_full_block(last_len) {
        let raw = raw_name(config, name, index)?;
        if let Ok(next_len) = backend.get(&raw, &mut []) {
            if next_len > 0 {
                log::warn!(
                    "[CHAIN] {} continues past a {}-byte buffer ({} more bytes in {})",
                    name,
                    buf.len(),
                    next_len,
                    raw
                );
                return Err(Error::new(
                    ErrorKind::BufferTooSmall,
                    "xattr value continues past buffer end",
                ));
            }
        }
    }

    Ok(pos)
}

/// 读取逻辑属性值到新分配的缓冲区
///
/// 从 `initial_buf_len` 开始，遇到 `BufferTooSmall` 就加倍重试，
/// 最多增长到 `max_value_len`。
///
/// # 返回
///
/// 属性不存在返回 `Ok(None)`；否则返回完整的值（可能为空）
pub fn getxattr_buf<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    config.validate()?;
    validate_name(config, name)?;

    let mut size = config.initial_buf_len;

    loop {
        let mut buf = Vec::new();
        buf.try_reserve_exact(size)?;
        buf.resize(size, 0);

        match read_chain(config, backend, name, &mut buf) {
            Ok(len) => {
                buf.truncate(len);
                log::debug!("[CHAIN] read {} ({} bytes, buffer {})", name, len, size);
                return Ok(Some(buf));
            }
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) if err.is_buffer_too_small() && size < config.max_value_len => {
                size = size.saturating_mul(2).min(config.max_value_len);
            }
            Err(err) => return Err(err),
        }
    }
}
