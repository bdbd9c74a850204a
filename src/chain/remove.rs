//! 链式删除

use crate::{backend::XattrBackend, config::ChainConfig, error::Result};

use super::name::{raw_name, validate_name};

/// 删除整条链
///
/// 从 chunk 0 开始依次删除，遇到第一个失败就停止。
/// chunk 0 的失败原样返回；之后的任何失败都视为链已结束。
///
/// 已知的不精确之处：chunk 0 之后因权限等其它原因失败时无法与“链结束”区分，
/// 这时会留下尾部 chunk 而仍然返回成功。
pub fn removexattr<B: XattrBackend + ?Sized>(
    config: &ChainConfig,
    backend: &B,
    name: &str,
) -> Result<()> {
    config.validate()?;
    validate_name(config, name)?;

    let mut index = 0;
    loop {
        let raw = raw_name(config, name, index)?;
        if let Err(err) = backend.remove(&raw) {
            if index == 0 {
                return Err(err);
            }
            if !err.is_not_found() {
                log::debug!("[CHAIN] removal of {} stopped at {}: {}", name, raw, err);
            }
            break;
        }
        index += 1;
    }

    log::debug!("[CHAIN] removed {} ({} chunks)", name, index);
    Ok(())
}
