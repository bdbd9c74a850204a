//! 链式写入
//!
//! 块大小按值的总长度选定一次，除最后一个 chunk 外全部写满，
//! 这样读端才能用整块判断后面是否还有 chunk。

use crate::{
    backend::XattrBackend,
    config::ChainConfig,
    error::Result,
    types::SetFlags,
};

use super::{
    name::{raw_name, validate_name},
    policy::get_xattr_block_size,
};

/// 写入逻辑属性值
///
/// # 参数
///
/// * `flags` - `CREATE`/`REPLACE` 只作用于 chunk 0；
///   `ENSURE_SINGLE_ATTR` 把整个值写进 chunk 0；
///   `SKIP_CHAIN_CLEANUP` 跳过尾部 chunk 清理
///
/// # 说明
///
/// 各 chunk 依次写入，没有原子性：中途失败时链可能处于新旧混合状态。
/// 值变短时，旧值多出来的 chunk 在写完后被删除，否则读端会把它们接到新值后面。
pub fn setxattr<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
    name: &str,
    value: &[u8],
    flags: SetFlags,
) -> Result<()> {
    config.validate()?;
    validate_name(config, name)?;

    let block = if flags.contains(SetFlags::ENSURE_SINGLE_ATTR) {
        value.len().max(1)
    } else {
        get_xattr_block_size(config, value.len())
    };

    let mut index = 0;
    let mut pos = 0;
    loop {
        let end = (pos + block).min(value.len());
        let raw = raw_name(config, name, index)?;
        let chunk_flags = if index == 0 {
            flags.primitive()
        } else {
            SetFlags::empty()
        };

        backend.set(&raw, &value[pos..end], chunk_flags)?;
        log::trace!("[CHAIN] wrote {} ({} bytes)", raw, end - pos);

        pos = end;
        index += 1;
        if pos >= value.len() {
            break;
        }
    }

    if !flags.contains(SetFlags::SKIP_CHAIN_CLEANUP) {
        remove_tail(config, backend, name, index)?;
    }

    log::debug!("[CHAIN] set {} ({} bytes in {} chunks)", name, value.len(), index);
    Ok(())
}

/// 删除从 `from` 开始的所有 chunk，直到底层报告不存在
///
/// 非 NotFound 的失败会返回给调用方，此时新值已经写入。
fn remove_tail<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
    name: &str,
    from: usize,
) -> Result<()> {
    let mut index = from;
    loop {
        let raw = raw_name(config, name, index)?;
        match backend.remove(&raw) {
            Ok(()) => {
                log::trace!("[CHAIN] removed stale {}", raw);
                index += 1;
            }
            Err(err) if err.is_not_found() => return Ok(()),
            Err(err) => {
                log::warn!("[CHAIN] failed to remove stale chunk {}: {}", raw, err);
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::PathXattr,
        chain::read::{getxattr, getxattr_buf},
        consts::*,
        error::{Error, ErrorKind},
        mem::MemXattrHost,
    };
    use alloc::{string::String, vec, vec::Vec};

    const OBJ: &str = "/current/obj";

    fn host() -> MemXattrHost {
        let host = MemXattrHost::new().with_value_max(CHAIN_XATTR_MAX_BLOCK_LEN);
        host.create(OBJ);
        host
    }

    #[test]
    fn test_chunk_layout() {
        let config = ChainConfig::default();
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        setxattr(&config, &obj, "a@b", &[1u8; 600], SetFlags::empty()).unwrap();
        assert_eq!(host.raw_keys(OBJ), vec!["a@@b", "a@@b@1", "a@@b@2"]);
        assert_eq!(host.raw_value(OBJ, "a@@b").map(|v| v.len()), Some(250));
        assert_eq!(host.raw_value(OBJ, "a@@b@2").map(|v| v.len()), Some(100));

        setxattr(&config, &obj, "big", &[2u8; 5000], SetFlags::empty()).unwrap();
        assert_eq!(host.raw_value(OBJ, "big").map(|v| v.len()), Some(2048));
        assert_eq!(host.raw_value(OBJ, "big@2").map(|v| v.len()), Some(904));
    }

    #[test]
    fn test_empty_value() {
        let config = ChainConfig::default();
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        setxattr(&config, &obj, "user.empty", b"", SetFlags::empty()).unwrap();
        assert_eq!(host.raw_keys(OBJ), vec!["user.empty"]);
        assert_eq!(getxattr_buf(&config, &obj, "user.empty").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_shrink_removes_stale_chunks() {
        let config = ChainConfig::default();
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        setxattr(&config, &obj, "user.v", &[7u8; 900], SetFlags::empty()).unwrap();
        assert_eq!(host.raw_keys(OBJ).len(), 4);

        setxattr(&config, &obj, "user.v", &[8u8; 250], SetFlags::empty()).unwrap();
        assert_eq!(host.raw_keys(OBJ), vec!["user.v"]);

        let mut buf = vec![0u8; 250];
        assert_eq!(getxattr(&config, &obj, "user.v", &mut buf).unwrap(), 250);
        assert_eq!(buf, vec![8u8; 250]);
    }

    #[test]
    fn test_skip_cleanup_leaves_tail() {
        let config = ChainConfig::default();
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        setxattr(&config, &obj, "user.v", &[7u8; 600], SetFlags::empty()).unwrap();
        setxattr(&config, &obj, "user.v", &[8u8; 10], SetFlags::SKIP_CHAIN_CLEANUP).unwrap();

        let keys: Vec<String> = host.raw_keys(OBJ);
        assert_eq!(keys.len(), 3);
        // chunk 0 不是整块，读端在这里结束
        assert_eq!(getxattr_buf(&config, &obj, "user.v").unwrap(), Some(vec![8u8; 10]));
    }

    #[test]
    fn test_create_and_replace() {
        let config = ChainConfig::default();
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        let err = setxattr(&config, &obj, "user.v", b"x", SetFlags::REPLACE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        setxattr(&config, &obj, "user.v", &[1u8; 700], SetFlags::CREATE).unwrap();
        let err = setxattr(&config, &obj, "user.v", b"x", SetFlags::CREATE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        // REPLACE 只检查 chunk 0，后续 chunk 正常新建
        setxattr(&config, &obj, "user.v", &[2u8; 1500], SetFlags::REPLACE).unwrap();
        assert_eq!(getxattr_buf(&config, &obj, "user.v").unwrap(), Some(vec![2u8; 1500]));
    }

    #[test]
    fn test_ensure_single_attr() {
        let config = ChainConfig::default();
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        setxattr(&config, &obj, "user.one", &[3u8; 900], SetFlags::ENSURE_SINGLE_ATTR).unwrap();
        assert_eq!(host.raw_keys(OBJ), vec!["user.one"]);
        assert_eq!(getxattr_buf(&config, &obj, "user.one").unwrap(), Some(vec![3u8; 900]));

        // 超过底层单个属性的上限
        let err = setxattr(&config, &obj, "user.two", &[3u8; 3000], SetFlags::ENSURE_SINGLE_ATTR)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSpace);
    }

    #[test]
    fn test_cleanup_failure_reported() {
        let config = ChainConfig::default();
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        setxattr(&config, &obj, "user.v", &[7u8; 600], SetFlags::empty()).unwrap();
        host.inject_fault("user.v@1", Error::from_errno(EIO, "io"));

        let err = setxattr(&config, &obj, "user.v", b"short", SetFlags::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(host.raw_value(OBJ, "user.v").as_deref(), Some(&b"short"[..]));
    }

    #[test]
    fn test_invalid_name() {
        let config = ChainConfig::default();
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        let long = "x".repeat(CHAIN_XATTR_MAX_NAME_LEN + 1);
        let err = setxattr(&config, &obj, &long, b"v", SetFlags::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(host.raw_keys(OBJ).is_empty());
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let host = host();
        let obj = PathXattr::new(&host, OBJ);

        let config = ChainConfig::default().with_block_lens(0, 2048);
        let err = setxattr(&config, &obj, "user.v", &[1u8; 10], SetFlags::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(host.raw_keys(OBJ).is_empty());
    }
}
