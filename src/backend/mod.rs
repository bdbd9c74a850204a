//! 底层 xattr 原语抽象
//!
//! backend/mod.rs 定义单个已寻址对象上的原语接口 `XattrBackend`，
//! 链式算法只依赖它，因此对路径寻址和描述符寻址是同一份实现。

//! backend/host.rs 定义宿主提供的两组原语（路径 / 文件描述符），
//! 并用 `PathXattr`、`FdXattr` 把它们适配为 `XattrBackend`。

mod host;

pub use host::{FdXattr, PathXattr, XattrHost};

use crate::{error::Result, types::SetFlags};

/// 单个对象上的 xattr 原语接口
///
/// 每个方法只操作一个物理键，原子性也只到单键粒度。
/// 与系统调用一样，所有方法只需要共享引用；并发协调由调用方负责。
///
/// # 示例
///
/// ```rust,ignore
/// use chain_xattr::{XattrBackend, SetFlags, Result};
///
/// struct MyObject {
///     // ...
/// }
///
/// impl XattrBackend for MyObject {
///     fn get(&self, key: &str, buf: &mut [u8]) -> Result<usize> {
///         // buf 为空时只返回长度
///         Ok(0)
///     }
///
///     fn set(&self, key: &str, value: &[u8], flags: SetFlags) -> Result<()> {
///         Ok(())
///     }
///
///     fn remove(&self, key: &str) -> Result<()> {
///         Ok(())
///     }
///
///     fn list(&self, buf: &mut [u8]) -> Result<usize> {
///         Ok(0)
///     }
/// }
/// ```
pub trait XattrBackend {
    /// 读取物理属性
    ///
    /// # 参数
    ///
    /// * `key` - 物理键
    /// * `buf` - 目标缓冲区；为空时不写入，只返回值的长度
    ///
    /// # 返回
    ///
    /// 成功返回值的长度。属性不存在返回 `NotFound`，
    /// 缓冲区小于值长度返回 `BufferTooSmall`
    fn get(&self, key: &str, buf: &mut [u8]) -> Result<usize>;

    /// 写入物理属性
    ///
    /// `flags` 只会包含 `CREATE`/`REPLACE`
    fn set(&self, key: &str, value: &[u8], flags: SetFlags) -> Result<()>;

    /// 删除物理属性
    fn remove(&self, key: &str) -> Result<()>;

    /// 列出所有物理键
    ///
    /// 输出为以 `\0` 结尾的键依次排列；`buf` 为空时只返回所需字节数
    fn list(&self, buf: &mut [u8]) -> Result<usize>;
}

impl<T: XattrBackend + ?Sized> XattrBackend for &T {
    fn get(&self, key: &str, buf: &mut [u8]) -> Result<usize> {
        (**self).get(key, buf)
    }

    fn set(&self, key: &str, value: &[u8], flags: SetFlags) -> Result<()> {
        (**self).set(key, value, flags)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn list(&self, buf: &mut [u8]) -> Result<usize> {
        (**self).list(buf)
    }
}
