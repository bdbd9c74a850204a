//! 错误类型定义
//!
//! 提供链式 xattr 操作的错误类型。底层原语返回的 errno 会被保留，
//! 以便调用方在需要时区分具体原因。

use core::fmt;

use crate::consts::*;

/// 链式 xattr 操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
    errno: Option<i32>,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 属性不存在（仅在 chunk 0 上有意义）
    NotFound,
    /// 调用方缓冲区不足，应使用更大的缓冲区重试
    BufferTooSmall,
    /// 内部临时缓冲区分配失败
    OutOfMemory,
    /// 无效参数（如名称超长）
    InvalidInput,
    /// 权限错误
    PermissionDenied,
    /// 空间不足或值超出底层限制
    NoSpace,
    /// 已存在
    AlreadyExists,
    /// 不支持的操作
    Unsupported,
    /// 其他底层 I/O 错误
    Io,
}

impl ErrorKind {
    /// 从 errno 推断错误类别
    pub const fn from_errno(errno: i32) -> Self {
        match errno {
            ENODATA => ErrorKind::NotFound,
            ERANGE => ErrorKind::BufferTooSmall,
            ENOMEM => ErrorKind::OutOfMemory,
            EINVAL | ENAMETOOLONG => ErrorKind::InvalidInput,
            EACCES | EPERM => ErrorKind::PermissionDenied,
            ENOSPC | E2BIG => ErrorKind::NoSpace,
            EEXIST => ErrorKind::AlreadyExists,
            EOPNOTSUPP => ErrorKind::Unsupported,
            _ => ErrorKind::Io,
        }
    }

    /// 该类别对应的典型 errno
    pub const fn to_errno(self) -> i32 {
        match self {
            ErrorKind::NotFound => ENODATA,
            ErrorKind::BufferTooSmall => ERANGE,
            ErrorKind::OutOfMemory => ENOMEM,
            ErrorKind::InvalidInput => EINVAL,
            ErrorKind::PermissionDenied => EACCES,
            ErrorKind::NoSpace => ENOSPC,
            ErrorKind::AlreadyExists => EEXIST,
            ErrorKind::Unsupported => EOPNOTSUPP,
            ErrorKind::Io => EIO,
        }
    }
}

impl Error {
    /// 创建新错误
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self {
            kind,
            message,
            errno: None,
        }
    }

    /// 从底层原语返回的 errno 创建错误
    ///
    /// 宿主包装系统调用时使用，原始 errno 会被保留。
    /// 负数 errno（`-ENODATA` 形式）同样接受。
    pub const fn from_errno(errno: i32, message: &'static str) -> Self {
        let errno = if errno < 0 { -errno } else { errno };
        Self {
            kind: ErrorKind::from_errno(errno),
            message,
            errno: Some(errno),
        }
    }

    /// 获取错误类型
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误消息
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// 获取 errno（底层原始值优先，否则为类别的典型值）
    pub const fn errno(&self) -> i32 {
        match self.errno {
            Some(errno) => errno,
            None => self.kind.to_errno(),
        }
    }

    /// 是否为“属性不存在”
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// 是否为“缓冲区不足”
    pub fn is_buffer_too_small(&self) -> bool {
        self.kind == ErrorKind::BufferTooSmall
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errno {
            Some(errno) => write!(f, "{:?}: {} (errno {})", self.kind, self.message, errno),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<alloc::collections::TryReserveError> for Error {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        Error::new(ErrorKind::OutOfMemory, "failed to allocate scratch buffer")
    }
}

/// Result 类型别名
pub type Result<T> = core::result::Result<T, Error>;
