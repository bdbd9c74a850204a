//! 链式扩展属性
//!
//! 一些文件系统限制单个 xattr 值的大小。这个模块把一个逻辑属性拆成多个物理属性存放：
//!
//! - chunk 0 的键是逻辑名称，其中每个 `@` 转义为 `@@`
//! - chunk `i > 0` 的键是 chunk 0 的键加上后缀 `@<i>`
//!
//! 链没有长度前缀。除最后一个 chunk 外每个 chunk 都恰好是一整块，
//! 读端看到短 chunk 就知道链结束了；看到整块则必须继续向后探测。
//!
//! # 模块结构
//!
//! - name.rs   - 物理键编解码
//! - policy.rs - 块大小策略
//! - read.rs   - 长度探测、有界读取、自增长读取
//! - write.rs  - 分块写入与尾部清理
//! - remove.rs - 整链删除
//! - list.rs   - 列出逻辑名称
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use chain_xattr::{ChainXattr, PathXattr, SetFlags};
//!
//! let chain = ChainXattr::new(PathXattr::new(&host, "/var/lib/osd/obj"));
//! chain.set("user.ceph._", &big_value, SetFlags::empty())?;
//! let value = chain.get_buf("user.ceph._")?;
//! ```

pub mod name;
pub mod policy;

mod list;
mod read;
mod remove;
mod write;

pub use list::{list_names, listxattr};
pub use read::{getxattr, getxattr_buf, getxattr_len};
pub use remove::removexattr;
pub use write::setxattr;

use alloc::{string::String, vec::Vec};

use crate::{
    backend::XattrBackend,
    config::ChainConfig,
    error::Result,
    types::SetFlags,
};

/// 绑定在一个对象上的链式 xattr 访问器
#[derive(Debug, Clone)]
pub struct ChainXattr<B> {
    backend: B,
    config: ChainConfig,
}

impl<B: XattrBackend> ChainXattr<B> {
    /// 使用默认配置创建
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: ChainConfig::default(),
        }
    }

    /// 使用指定配置创建，配置不合法时返回 `InvalidInput`
    pub fn with_config(backend: B, config: ChainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    /// 获取配置
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// 获取底层对象的引用
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 取回底层对象
    pub fn into_inner(self) -> B {
        self.backend
    }

    /// 逻辑属性的总长度
    pub fn get_len(&self, name: &str) -> Result<usize> {
        getxattr_len(&self.config, &self.backend, name)
    }

    /// 读取到调用方的缓冲区，`buf` 为空时只返回长度
    pub fn get(&self, name: &str, buf: &mut [u8]) -> Result<usize> {
        getxattr(&self.config, &self.backend, name, buf)
    }

    /// 读取完整的值，属性不存在时返回 `None`
    pub fn get_buf(&self, name: &str) -> Result<Option<Vec<u8>>> {
        getxattr_buf(&self.config, &self.backend, name)
    }

    /// 写入值
    pub fn set(&self, name: &str, value: &[u8], flags: SetFlags) -> Result<()> {
        setxattr(&self.config, &self.backend, name, value, flags)
    }

    /// 删除整条链
    pub fn remove(&self, name: &str) -> Result<()> {
        removexattr(&self.config, &self.backend, name)
    }

    /// 列出逻辑名称到调用方的缓冲区
    pub fn list(&self, names: &mut [u8]) -> Result<usize> {
        listxattr(&self.backend, names)
    }

    /// 列出逻辑名称
    pub fn list_names(&self) -> Result<Vec<String>> {
        list_names(&self.config, &self.backend)
    }
}
