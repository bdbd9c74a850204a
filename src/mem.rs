//! 内存 xattr 宿主
//!
//! 按 `getxattr(2)` 一族的语义在内存中实现 `XattrHost`：
//! - 单个物理属性有大小上限（超出返回 `E2BIG`）
//! - 缓冲区小于值时返回 `ERANGE`
//! - 属性不存在返回 `ENODATA`
//! - 支持 `CREATE`/`REPLACE`
//!
//! 路径和文件描述符指向同一个对象，可以用来验证两种寻址方式的一致性。
//! 另外支持按物理键注入错误，用于模拟权限、I/O 等底层故障。

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use core::cell::{Cell, RefCell};

use crate::{
    backend::XattrHost,
    consts::*,
    error::{Error, Result},
    types::{RawFd, SetFlags},
};

/// 默认的单个物理属性大小上限（与 Linux `XATTR_SIZE_MAX` 相同）
pub const MEM_XATTR_DEFAULT_VALUE_MAX: usize = 65536;

type Object = BTreeMap<String, Vec<u8>>;

#[derive(Debug, Default)]
struct MemState {
    objects: BTreeMap<String, Object>,
    fds: BTreeMap<RawFd, String>,
    next_fd: RawFd,
    faults: BTreeMap<String, Error>,
    list_fault: Option<Error>,
}

/// 内存 xattr 宿主
///
/// 内部使用 `RefCell`，因此不是 `Sync`；多线程场景由调用方包装。
#[derive(Debug)]
pub struct MemXattrHost {
    state: RefCell<MemState>,
    value_max: usize,
    get_calls: Cell<usize>,
}

impl Default for MemXattrHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemXattrHost {
    /// 创建空宿主
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MemState {
                next_fd: 3,
                ..MemState::default()
            }),
            value_max: MEM_XATTR_DEFAULT_VALUE_MAX,
            get_calls: Cell::new(0),
        }
    }

    /// 设置单个物理属性的大小上限
    pub fn with_value_max(mut self, value_max: usize) -> Self {
        self.value_max = value_max;
        self
    }

    /// 创建对象（已存在时不做任何事）
    pub fn create(&self, path: &str) {
        self.state
            .borrow_mut()
            .objects
            .entry(path.to_string())
            .or_default();
    }

    /// 打开对象，返回文件描述符
    pub fn open(&self, path: &str) -> Result<RawFd> {
        let mut state = self.state.borrow_mut();
        if !state.objects.contains_key(path) {
            return Err(Error::from_errno(ENOENT, "no such object"));
        }
        let fd = state.next_fd;
        state.next_fd += 1;
        state.fds.insert(fd, path.to_string());
        Ok(fd)
    }

    /// 关闭文件描述符
    pub fn close(&self, fd: RawFd) -> Result<()> {
        self.state
            .borrow_mut()
            .fds
            .remove(&fd)
            .map(|_| ())
            .ok_or_else(|| Error::from_errno(EBADF, "bad file descriptor"))
    }

    /// 对某个物理键上的所有操作注入错误
    pub fn inject_fault(&self, key: &str, err: Error) {
        self.state.borrow_mut().faults.insert(key.to_string(), err);
    }

    /// 对列出操作注入错误
    pub fn inject_list_fault(&self, err: Error) {
        self.state.borrow_mut().list_fault = Some(err);
    }

    /// 清除所有注入的错误
    pub fn clear_faults(&self) {
        let mut state = self.state.borrow_mut();
        state.faults.clear();
        state.list_fault = None;
    }

    /// 对象上的全部物理键（按字典序）
    pub fn raw_keys(&self, path: &str) -> Vec<String> {
        self.state
            .borrow()
            .objects
            .get(path)
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// 直接读取一个物理属性（绕过错误注入）
    pub fn raw_value(&self, path: &str, key: &str) -> Option<Vec<u8>> {
        self.state.borrow().objects.get(path)?.get(key).cloned()
    }

    /// 直接写入一个物理属性（绕过大小上限和错误注入）
    pub fn put_raw(&self, path: &str, key: &str, value: &[u8]) {
        self.state
            .borrow_mut()
            .objects
            .entry(path.to_string())
            .or_default()
            .insert(key.to_string(), value.to_vec());
    }

    /// 累计的 get 调用次数（两种寻址方式合计）
    pub fn get_calls(&self) -> usize {
        self.get_calls.get()
    }

    fn resolve(&self, fd: RawFd) -> Result<String> {
        self.state
            .borrow()
            .fds
            .get(&fd)
            .cloned()
            .ok_or_else(|| Error::from_errno(EBADF, "bad file descriptor"))
    }

    fn check_fault(state: &MemState, key: &str) -> Result<()> {
        match state.faults.get(key) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn do_get(&self, path: &str, key: &str, buf: &mut [u8]) -> Result<usize> {
        self.get_calls.set(self.get_calls.get() + 1);
        let state = self.state.borrow();
        Self::check_fault(&state, key)?;
        let value = state
            .objects
            .get(path)
            .ok_or_else(|| Error::from_errno(ENOENT, "no such object"))?
            .get(key)
            .ok_or_else(|| Error::from_errno(ENODATA, "no such attribute"))?;

        if buf.is_empty() {
            return Ok(value.len());
        }
        if buf.len() < value.len() {
            return Err(Error::from_errno(ERANGE, "attribute larger than buffer"));
        }
        buf[..value.len()].copy_from_slice(value);
        Ok(value.len())
    }

    fn do_set(&self, path: &str, key: &str, value: &[u8], flags: SetFlags) -> Result<()> {
        let mut state = self.state.borrow_mut();
        Self::check_fault(&state, key)?;
        if key.is_empty() {
            return Err(Error::from_errno(EINVAL, "empty attribute name"));
        }
        if value.len() > self.value_max {
            return Err(Error::from_errno(E2BIG, "attribute value too large"));
        }
        let obj = state
            .objects
            .get_mut(path)
            .ok_or_else(|| Error::from_errno(ENOENT, "no such object"))?;
        let exists = obj.contains_key(key);
        if flags.contains(SetFlags::CREATE) && exists {
            return Err(Error::from_errno(EEXIST, "attribute exists"));
        }
        if flags.contains(SetFlags::REPLACE) && !exists {
            return Err(Error::from_errno(ENODATA, "no such attribute"));
        }
        obj.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn do_remove(&self, path: &str, key: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        Self::check_fault(&state, key)?;
        state
            .objects
            .get_mut(path)
            .ok_or_else(|| Error::from_errno(ENOENT, "no such object"))?
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::from_errno(ENODATA, "no such attribute"))
    }

    fn do_list(&self, path: &str, buf: &mut [u8]) -> Result<usize> {
        let state = self.state.borrow();
        if let Some(err) = &state.list_fault {
            return Err(err.clone());
        }
        let obj = state
            .objects
            .get(path)
            .ok_or_else(|| Error::from_errno(ENOENT, "no such object"))?;
        let total: usize = obj.keys().map(|k| k.len() + 1).sum();

        if buf.is_empty() {
            return Ok(total);
        }
        if buf.len() < total {
            return Err(Error::from_errno(ERANGE, "list larger than buffer"));
        }

        let mut pos = 0;
        for key in obj.keys() {
            buf[pos..pos + key.len()].copy_from_slice(key.as_bytes());
            buf[pos + key.len()] = 0;
            pos += key.len() + 1;
        }
        Ok(total)
    }
}

impl XattrHost for MemXattrHost {
    fn getxattr(&self, path: &str, key: &str, buf: &mut [u8]) -> Result<usize> {
        self.do_get(path, key, buf)
    }

    fn setxattr(&self, path: &str, key: &str, value: &[u8], flags: SetFlags) -> Result<()> {
        self.do_set(path, key, value, flags)
    }

    fn removexattr(&self, path: &str, key: &str) -> Result<()> {
        self.do_remove(path, key)
    }

    fn listxattr(&self, path: &str, buf: &mut [u8]) -> Result<usize> {
        self.do_list(path, buf)
    }

    fn fgetxattr(&self, fd: RawFd, key: &str, buf: &mut [u8]) -> Result<usize> {
        let path = self.resolve(fd)?;
        self.do_get(&path, key, buf)
    }

    fn fsetxattr(&self, fd: RawFd, key: &str, value: &[u8], flags: SetFlags) -> Result<()> {
        let path = self.resolve(fd)?;
        self.do_set(&path, key, value, flags)
    }

    fn fremovexattr(&self, fd: RawFd, key: &str) -> Result<()> {
        let path = self.resolve(fd)?;
        self.do_remove(&path, key)
    }

    fn flistxattr(&self, fd: RawFd, buf: &mut [u8]) -> Result<usize> {
        let path = self.resolve(fd)?;
        self.do_list(&path, buf)
    }
}
