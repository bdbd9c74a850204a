//! 链式列出
//!
//! 列出对象上的全部物理键，只保留每条链的 chunk 0，并还原为逻辑名称。

use alloc::{string::String, vec::Vec};

use crate::{
    backend::XattrBackend,
    config::ChainConfig,
    error::{Error, ErrorKind, Result},
};

use super::name::translate_raw_name;

/// 物理列表大小的两倍，逻辑名称总是比物理编码短
fn raw_list_estimate<B: XattrBackend + ?Sized>(backend: &B) -> Result<usize> {
    backend
        .list(&mut [])?
        .checked_mul(2)
        .ok_or(Error::new(ErrorKind::OutOfMemory, "xattr list too large"))
}

/// 列出逻辑属性名称
///
/// # 参数
///
/// * `names` - 输出缓冲区（名称以 `\0` 结尾依次排列）；
///   为空时返回所需大小的保守估计（物理列表大小的两倍）
///
/// # 返回
///
/// 成功返回写入的字节数
///
/// # 错误
///
/// 输出缓冲区放不下时返回 `BufferTooSmall`，此时 `names` 中已写入的内容不可用
pub fn listxattr<B: XattrBackend + ?Sized>(backend: &B, names: &mut [u8]) -> Result<usize> {
    let total_len = raw_list_estimate(backend)?;
    if names.is_empty() || total_len == 0 {
        return Ok(total_len);
    }

    let mut full = Vec::new();
    full.try_reserve_exact(total_len)?;
    full.resize(total_len, 0);
    let raw_len = backend.list(&mut full)?;

    let mut dest = 0;
    for raw in full[..raw_len].split(|&b| b == 0).filter(|raw| !raw.is_empty()) {
        let (name, is_first) = translate_raw_name(raw);
        if !is_first {
            continue;
        }
        if dest + name.len() + 1 > names.len() {
            return Err(Error::new(ErrorKind::BufferTooSmall, "xattr name list larger than buffer"));
        }
        names[dest..dest + name.len()].copy_from_slice(&name);
        names[dest + name.len()] = 0;
        dest += name.len() + 1;
    }

    log::trace!("[CHAIN] listed {} raw bytes -> {} name bytes", raw_len, dest);
    Ok(dest)
}

/// 列出逻辑属性名称（自动分配缓冲区）
///
/// 物理列表可能在两次调用之间变大，遇到 `BufferTooSmall` 时按大小加倍重试，
/// 上限为 `max_value_len`。
pub fn list_names<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
) -> Result<Vec<String>> {
    config.validate()?;
    let mut size = listxattr(backend, &mut [])?;

    loop {
        if size == 0 {
            return Ok(Vec::new());
        }

        let mut buf = Vec::new();
        buf.try_reserve_exact(size)?;
        buf.resize(size, 0);

        match listxattr(backend, &mut buf) {
            Ok(len) => return split_names(&buf[..len]),
            Err(err) if err.is_buffer_too_small() && size < config.max_value_len => {
                let probe = listxattr(backend, &mut [])?;
                size = probe.max(size.saturating_mul(2)).min(config.max_value_len);
            }
            Err(err) => return Err(err),
        }
    }
}

fn split_names(buf: &[u8]) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for raw in buf.split(|&b| b == 0).filter(|raw| !raw.is_empty()) {
        let name = core::str::from_utf8(raw)
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "xattr name is not valid UTF-8"))?;
        names.push(String::from(name));
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::PathXattr,
        chain::write::setxattr,
        consts::*,
        mem::MemXattrHost,
        types::SetFlags,
    };
    use alloc::vec;

    const OBJ: &str = "/current/obj";

    fn populated() -> MemXattrHost {
        let config = ChainConfig::default();
        let host = MemXattrHost::new();
        host.create(OBJ);
        {
            let obj = PathXattr::new(&host, OBJ);
            setxattr(&config, &obj, "user.small", b"s", SetFlags::empty()).unwrap();
            setxattr(&config, &obj, "user.a@b", &[0u8; 700], SetFlags::empty()).unwrap();
            setxattr(&config, &obj, "@", &[0u8; 5000], SetFlags::empty()).unwrap();
        }
        host
    }

    #[test]
    fn test_list_filters_chunks() {
        let config = ChainConfig::default();
        let host = populated();
        let obj = PathXattr::new(&host, OBJ);

        assert!(host.raw_keys(OBJ).len() > 3);

        let mut names = list_names(&config, &obj).unwrap();
        names.sort();
        assert_eq!(names, vec!["@", "user.a@b", "user.small"]);
    }

    #[test]
    fn test_list_raw_buffer() {
        let host = populated();
        let obj = PathXattr::new(&host, OBJ);

        let estimate = listxattr(&obj, &mut []).unwrap();
        let raw_total: usize = host.raw_keys(OBJ).iter().map(|k| k.len() + 1).sum();
        assert_eq!(estimate, raw_total * 2);

        let mut buf = vec![0u8; estimate];
        let len = listxattr(&obj, &mut buf).unwrap();
        assert_eq!(&buf[..len], b"@\0user.a@b\0user.small\0");
    }

    #[test]
    fn test_list_buffer_too_small() {
        let host = populated();
        let obj = PathXattr::new(&host, OBJ);

        // 恰好差一个结尾 \0
        let needed = b"@\0user.a@b\0user.small\0".len();
        let mut buf = vec![0u8; needed - 1];
        let err = listxattr(&obj, &mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BufferTooSmall);

        let mut buf = vec![0u8; needed];
        assert_eq!(listxattr(&obj, &mut buf).unwrap(), needed);
    }

    #[test]
    fn test_list_empty_object() {
        let config = ChainConfig::default();
        let host = MemXattrHost::new();
        host.create(OBJ);
        let obj = PathXattr::new(&host, OBJ);

        assert_eq!(listxattr(&obj, &mut []).unwrap(), 0);
        let mut buf = vec![0u8; 16];
        assert_eq!(listxattr(&obj, &mut buf).unwrap(), 0);
        assert!(list_names(&config, &obj).unwrap().is_empty());
    }

    #[test]
    fn test_list_error_propagates() {
        let config = ChainConfig::default();
        let host = populated();
        host.inject_list_fault(Error::from_errno(EACCES, "denied"));
        let obj = PathXattr::new(&host, OBJ);

        let err = list_names(&config, &obj).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_list_names_invalid_config() {
        let host = populated();
        let obj = PathXattr::new(&host, OBJ);

        let config = ChainConfig::default().with_growth(4096, 1024);
        let err = list_names(&config, &obj).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
