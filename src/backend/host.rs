//! 宿主原语与两种寻址方式的适配器

use crate::{error::Result, types::{RawFd, SetFlags}};

use super::XattrBackend;

/// 宿主环境提供的 xattr 原语
///
/// 与 `getxattr(2)` 一族系统调用一一对应，路径寻址与描述符寻址各一组。
/// 缓冲区为空表示“只查询长度”。
pub trait XattrHost {
    /// 按路径读取
    fn getxattr(&self, path: &str, key: &str, buf: &mut [u8]) -> Result<usize>;
    /// 按路径写入
    fn setxattr(&self, path: &str, key: &str, value: &[u8], flags: SetFlags) -> Result<()>;
    /// 按路径删除
    fn removexattr(&self, path: &str, key: &str) -> Result<()>;
    /// 按路径列出
    fn listxattr(&self, path: &str, buf: &mut [u8]) -> Result<usize>;

    /// 按描述符读取
    fn fgetxattr(&self, fd: RawFd, key: &str, buf: &mut [u8]) -> Result<usize>;
    /// 按描述符写入
    fn fsetxattr(&self, fd: RawFd, key: &str, value: &[u8], flags: SetFlags) -> Result<()>;
    /// 按描述符删除
    fn fremovexattr(&self, fd: RawFd, key: &str) -> Result<()>;
    /// 按描述符列出
    fn flistxattr(&self, fd: RawFd, buf: &mut [u8]) -> Result<usize>;
}

/// 按路径寻址的对象
#[derive(Debug)]
pub struct PathXattr<'a, H: ?Sized> {
    host: &'a H,
    path: &'a str,
}

impl<'a, H: XattrHost + ?Sized> PathXattr<'a, H> {
    /// 绑定宿主与路径
    pub fn new(host: &'a H, path: &'a str) -> Self {
        Self { host, path }
    }

    /// 对象路径
    pub fn path(&self) -> &str {
        self.path
    }
}

impl<H: XattrHost + ?Sized> XattrBackend for PathXattr<'_, H> {
    fn get(&self, key: &str, buf: &mut [u8]) -> Result<usize> {
        self.host.getxattr(self.path, key, buf)
    }

    fn set(&self, key: &str, value: &[u8], flags: SetFlags) -> Result<()> {
        self.host.setxattr(self.path, key, value, flags)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.host.removexattr(self.path, key)
    }

    fn list(&self, buf: &mut [u8]) -> Result<usize> {
        self.host.listxattr(self.path, buf)
    }
}

/// 按文件描述符寻址的对象
#[derive(Debug)]
pub struct FdXattr<'a, H: ?Sized> {
    host: &'a H,
    fd: RawFd,
}

impl<'a, H: XattrHost + ?Sized> FdXattr<'a, H> {
    /// 绑定宿主与描述符
    pub fn new(host: &'a H, fd: RawFd) -> Self {
        Self { host, fd }
    }

    /// 文件描述符
    pub fn fd(&self) -> RawFd {
        self.fd
    }
}

impl<H: XattrHost + ?Sized> XattrBackend for FdXattr<'_, H> {
    fn get(&self, key: &str, buf: &mut [u8]) -> Result<usize> {
        self.host.fgetxattr(self.fd, key, buf)
    }

    fn set(&self, key: &str, value: &[u8], flags: SetFlags) -> Result<()> {
        self.host.fsetxattr(self.fd, key, value, flags)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.host.fremovexattr(self.fd, key)
    }

    fn list(&self, buf: &mut [u8]) -> Result<usize> {
        self.host.flistxattr(self.fd, buf)
    }
}
