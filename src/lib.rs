//! chain_xattr: 链式扩展属性
//!
//! 一些文件系统对单个扩展属性值的大小有限制（或者大值会被挤出 inode）。
//! 这个库把任意大小的逻辑属性拆分成多个有界的物理属性存放，并在读取时透明地重新拼接：
//! - **确定性的物理键命名**（`@` 转义 + `@<index>` 后缀）
//! - **两种块大小**，短值使用小块以便内联在 inode 中
//! - **无长度前缀**，靠整块/短块判断链的结尾
//! - **路径与文件描述符两种寻址方式**，算法只有一份
//!
//! # 示例
//!
//! ```rust,ignore
//! use chain_xattr::{XattrHost, SetFlags, Result};
//!
//! // 实现 XattrHost trait，把原语接到 getxattr(2) 等系统调用上
//! struct SysHost;
//!
//! impl XattrHost for SysHost {
//!     // ...
//! }
//!
//! fn main() -> Result<()> {
//!     let host = SysHost;
//!     chain_xattr::set(&host, "/osd/obj", "user.ceph._", &value, SetFlags::empty())?;
//!     let value = chain_xattr::get_buf(&host, "/osd/obj", "user.ceph._")?;
//!     Ok(())
//! }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`consts`] - 常量定义
//! - [`config`] - 配置
//! - [`types`] - 公共类型
//! - [`backend`] - 底层原语抽象
//! - [`chain`] - 链式协议
//! - [`api`] - 函数式接口
//! - [`mem`] - 内存宿主

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// ===== 核心模块 =====

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 配置
pub mod config;

/// 公共类型
pub mod types;

/// 底层原语抽象
pub mod backend;

/// 链式协议
pub mod chain;

/// 函数式接口
pub mod api;

/// 内存宿主
pub mod mem;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorKind, Result};

// 配置与类型
pub use config::ChainConfig;
pub use types::{ChunkSize, RawFd, SetFlags};

// 原语
pub use backend::{FdXattr, PathXattr, XattrBackend, XattrHost};

// 链式协议
pub use chain::ChainXattr;

// 函数式接口
pub use api::{
    fget, fget_buf, fget_len, flist, flist_names, fremove, fset,
    get, get_buf, get_len, list, list_names, remove, set,
};

// 内存宿主
pub use mem::MemXattrHost;
