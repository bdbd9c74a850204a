//! 逻辑名称与物理键之间的编解码
//!
//! 物理键规则：
//! - 逻辑名中的每个 `@` 写成 `@@`
//! - chunk 0 不带后缀，chunk `i > 0` 追加 `@<i>`
//!
//! 转义是单射的：物理键里 `@` 后跟非 `@` 字符（或字符串结尾）
//! 必然是 chunk 序号后缀的开始，不会是名称数据。

use alloc::{string::String, vec::Vec};
use core::fmt::Write;

use crate::{
    config::ChainConfig,
    consts::CHAIN_XATTR_ESCAPE,
    error::{Error, ErrorKind, Result},
};

/// 检查逻辑名称
///
/// 名称不能为空，不能含 `\0`，长度不能超过 `max_name_len`
pub fn validate_name(config: &ChainConfig, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::new(ErrorKind::InvalidInput, "empty xattr name"));
    }
    if name.len() > config.max_name_len {
        return Err(Error::new(ErrorKind::InvalidInput, "xattr name too long"));
    }
    if name.as_bytes().contains(&0) {
        return Err(Error::new(ErrorKind::InvalidInput, "xattr name contains NUL"));
    }
    Ok(())
}

/// 生成第 `index` 个 chunk 的物理键
///
/// `name` 应已通过 [`validate_name`] 检查；这里只检查物理键的长度上限。
///
/// # 示例
///
/// ```ignore
/// assert_eq!(raw_name(&config, "a@b", 0)?, "a@@b");
/// assert_eq!(raw_name(&config, "a@b", 1)?, "a@@b@1");
/// ```
pub fn raw_name(config: &ChainConfig, name: &str, index: usize) -> Result<String> {
    let mut raw = String::new();
    raw.try_reserve_exact(name.len() * 2 + 12)?;
    for ch in name.chars() {
        if ch == CHAIN_XATTR_ESCAPE as char {
            raw.push(ch);
        }
        raw.push(ch);
    }

    if index > 0 {
        // 写入 String 不会失败
        let _ = write!(raw, "@{}", index);
    }

    if raw.len() > config.raw_name_len() {
        return Err(Error::new(ErrorKind::InvalidInput, "raw xattr name too long"));
    }
    Ok(raw)
}

/// 解码状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// 普通字符
    Normal,
    /// 刚读到一个 `@`
    SawEscape,
}

/// 从物理键还原逻辑名称
///
/// # 返回
///
/// `(name, is_first)`：`is_first` 为 true 表示这是某条链的 chunk 0。
/// 遇到后缀时立即停止，不解析后缀里的序号。
pub fn translate_raw_name(raw: &[u8]) -> (Vec<u8>, bool) {
    let mut name = Vec::with_capacity(raw.len());
    let mut state = DecodeState::Normal;

    for &byte in raw {
        match state {
            DecodeState::Normal => {
                if byte == CHAIN_XATTR_ESCAPE {
                    state = DecodeState::SawEscape;
                } else {
                    name.push(byte);
                }
            }
            DecodeState::SawEscape => {
                if byte != CHAIN_XATTR_ESCAPE {
                    return (name, false);
                }
                name.push(CHAIN_XATTR_ESCAPE);
                state = DecodeState::Normal;
            }
        }
    }

    // 结尾单独的 `@` 同样视为后缀起始
    let is_first = state == DecodeState::Normal;
    (name, is_first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChainConfig {
        ChainConfig::default()
    }

    #[test]
    fn test_escape_example() {
        let config = config();
        assert_eq!(raw_name(&config, "a@b", 0).unwrap(), "a@@b");
        assert_eq!(raw_name(&config, "a@b", 1).unwrap(), "a@@b@1");
        assert_eq!(raw_name(&config, "user.x", 12).unwrap(), "user.x@12");

        let (name, is_first) = translate_raw_name(b"a@@b@1");
        assert_eq!(name, b"a@b");
        assert!(!is_first);
    }

    #[test]
    fn test_round_trip_chunk_zero() {
        let config = config();
        for name in ["plain", "@", "@@", "a@", "@a", "a@@b", "x@1", "user.ceph._@@"] {
            let raw = raw_name(&config, name, 0).unwrap();
            let (decoded, is_first) = translate_raw_name(raw.as_bytes());
            assert_eq!(decoded, name.as_bytes(), "raw = {}", raw);
            assert!(is_first, "raw = {}", raw);
        }
    }

    #[test]
    fn test_suffix_never_first() {
        let config = config();
        for name in ["plain", "@", "a@b", "x@1"] {
            for index in [1, 2, 9, 10, 4096] {
                let raw = raw_name(&config, name, index).unwrap();
                let (decoded, is_first) = translate_raw_name(raw.as_bytes());
                assert!(!is_first, "raw = {}", raw);
                assert_eq!(decoded, name.as_bytes());
            }
        }
    }

    #[test]
    fn test_trailing_escape() {
        let (name, is_first) = translate_raw_name(b"abc@");
        assert_eq!(name, b"abc");
        assert!(!is_first);
    }

    #[test]
    fn test_name_limits() {
        let config = config();
        let longest = "n".repeat(config.max_name_len);
        let raw = raw_name(&config, &longest, 0).unwrap();
        assert_eq!(raw.len(), config.max_name_len);

        let all_escapes = "@".repeat(config.max_name_len);
        let raw = raw_name(&config, &all_escapes, u32::MAX as usize).unwrap();
        assert!(raw.len() <= config.raw_name_len());

        let too_long = "n".repeat(config.max_name_len + 1);
        let err = validate_name(&config, &too_long).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        assert!(validate_name(&config, &longest).is_ok());
        assert!(validate_name(&config, "").is_err());
        assert!(validate_name(&config, "a\0b").is_err());

        // 物理键自身的长度上限仍然生效
        if cfg!(target_pointer_width = "64") {
            let err = raw_name(&config, &all_escapes, usize::MAX).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }
}
