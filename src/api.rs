//! 链式 xattr 公共 API
//!
//! 供存储引擎直接使用的函数接口，路径寻址与描述符寻址各一组，
//! 语义完全相同。全部使用默认配置（标准块大小）。
//!
//! ```ignore
//! let len = chain_xattr::get_len(&host, "/osd/current/obj", "user.ceph._")?;
//! let mut buf = vec![0u8; len];
//! chain_xattr::get(&host, "/osd/current/obj", "user.ceph._", &mut buf)?;
//!
//! chain_xattr::fset(&host, fd, "user.ceph._", &value, SetFlags::empty())?;
//! ```

use alloc::{string::String, vec::Vec};

use crate::{
    backend::{FdXattr, PathXattr, XattrHost},
    chain,
    config::ChainConfig,
    error::Result,
    types::{RawFd, SetFlags},
};

// ===== 路径寻址 =====

/// 逻辑属性的总长度
pub fn get_len<H: XattrHost + ?Sized>(host: &H, path: &str, name: &str) -> Result<usize> {
    chain::getxattr_len(&ChainConfig::default(), &PathXattr::new(host, path), name)
}

/// 读取逻辑属性，`buf` 为空时只返回长度
pub fn get<H: XattrHost + ?Sized>(host: &H, path: &str, name: &str, buf: &mut [u8]) -> Result<usize> {
    chain::getxattr(&ChainConfig::default(), &PathXattr::new(host, path), name, buf)
}

/// 读取完整的逻辑属性，不存在时返回 `None`
pub fn get_buf<H: XattrHost + ?Sized>(host: &H, path: &str, name: &str) -> Result<Option<Vec<u8>>> {
    chain::getxattr_buf(&ChainConfig::default(), &PathXattr::new(host, path), name)
}

/// 写入逻辑属性
pub fn set<H: XattrHost + ?Sized>(
    host: &H,
    path: &str,
    name: &str,
    value: &[u8],
    flags: SetFlags,
) -> Result<()> {
    chain::setxattr(&ChainConfig::default(), &PathXattr::new(host, path), name, value, flags)
}

/// 删除逻辑属性
pub fn remove<H: XattrHost + ?Sized>(host: &H, path: &str, name: &str) -> Result<()> {
    chain::removexattr(&ChainConfig::default(), &PathXattr::new(host, path), name)
}

/// 列出逻辑名称到调用方的缓冲区
pub fn list<H: XattrHost + ?Sized>(host: &H, path: &str, names: &mut [u8]) -> Result<usize> {
    chain::listxattr(&PathXattr::new(host, path), names)
}

/// 列出逻辑名称
pub fn list_names<H: XattrHost + ?Sized>(host: &H, path: &str) -> Result<Vec<String>> {
    chain::list_names(&ChainConfig::default(), &PathXattr::new(host, path))
}

// ===== 文件描述符寻址 =====

/// 逻辑属性的总长度
pub fn fget_len<H: XattrHost + ?Sized>(host: &H, fd: RawFd, name: &str) -> Result<usize> {
    chain::getxattr_len(&ChainConfig::default(), &FdXattr::new(host, fd), name)
}

/// 读取逻辑属性，`buf` 为空时只返回长度
pub fn fget<H: XattrHost + ?Sized>(host: &H, fd: RawFd, name: &str, buf: &mut [u8]) -> Result<usize> {
    chain::getxattr(&ChainConfig::default(), &FdXattr::new(host, fd), name, buf)
}

/// 读取完整的逻辑属性，不存在时返回 `None`
pub fn fget_buf<H: XattrHost + ?Sized>(host: &H, fd: RawFd, name: &str) -> Result<Option<Vec<u8>>> {
    chain::getxattr_buf(&ChainConfig::default(), &FdXattr::new(host, fd), name)
}

/// 写入逻辑属性
pub fn fset<H: XattrHost + ?Sized>(
    host: &H,
    fd: RawFd,
    name: &str,
    value: &[u8],
    flags: SetFlags,
) -> Result<()> {
    chain::setxattr(&ChainConfig::default(), &FdXattr::new(host, fd), name, value, flags)
}

/// 删除逻辑属性
pub fn fremove<H: XattrHost + ?Sized>(host: &H, fd: RawFd, name: &str) -> Result<()> {
    chain::removexattr(&ChainConfig::default(), &FdXattr::new(host, fd), name)
}

/// 列出逻辑名称到调用方的缓冲区
pub fn flist<H: XattrHost + ?Sized>(host: &H, fd: RawFd, names: &mut [u8]) -> Result<usize> {
    chain::listxattr(&FdXattr::new(host, fd), names)
}

/// 列出逻辑名称
pub fn flist_names<H: XattrHost + ?Sized>(host: &H, fd: RawFd) -> Result<Vec<String>> {
    chain::list_names(&ChainConfig::default(), &FdXattr::new(host, fd))
}
