//! 链式 xattr 常量定义
//!
//! 这个模块包含了：
//! - 物理键命名约定相关常量
//! - 两种块大小以及短值阈值
//! - 宿主映射所用的 errno 值

//=============================================================================
// 命名约定
//=============================================================================

/// 转义字符，同时作为 chunk 序号后缀的起始标记
pub const CHAIN_XATTR_ESCAPE: u8 = b'@';

/// 逻辑属性名最大长度（字节）
pub const CHAIN_XATTR_MAX_NAME_LEN: usize = 128;

/// 物理键最大长度（名称全部转义加上 `@<index>` 后缀）
pub const CHAIN_XATTR_RAW_NAME_LEN: usize = CHAIN_XATTR_MAX_NAME_LEN * 2 + 16;

//=============================================================================
// 块大小策略
//=============================================================================

/// 大块大小
pub const CHAIN_XATTR_MAX_BLOCK_LEN: usize = 2048;

/// 小块大小
///
/// 足够小，使短值能与其它 inode 元数据一起内联存放
pub const CHAIN_XATTR_SHORT_BLOCK_LEN: usize = 250;

/// 短值阈值：总长度不超过该值时使用小块
pub const CHAIN_XATTR_SHORT_LEN_THRESHOLD: usize = 1000;

//=============================================================================
// 自增长读取
//=============================================================================

/// 自增长读取的初始缓冲区大小
pub const CHAIN_XATTR_INITIAL_BUF_LEN: usize = 1024;

/// 自增长读取允许的最大值长度（1 MiB）
pub const CHAIN_XATTR_MAX_VALUE_LEN: usize = 1 << 20;

//=============================================================================
// errno（Linux 取值）
//=============================================================================

/// 操作不允许
pub const EPERM: i32 = 1;
/// 文件不存在
pub const ENOENT: i32 = 2;
/// I/O 错误
pub const EIO: i32 = 5;
/// 参数列表过长（值超过底层限制）
pub const E2BIG: i32 = 7;
/// 无效文件描述符
pub const EBADF: i32 = 9;
/// 内存不足
pub const ENOMEM: i32 = 12;
/// 权限不足
pub const EACCES: i32 = 13;
/// 已存在
pub const EEXIST: i32 = 17;
/// 无效参数
pub const EINVAL: i32 = 22;
/// 设备空间不足
pub const ENOSPC: i32 = 28;
/// 结果超出范围（缓冲区太小）
pub const ERANGE: i32 = 34;
/// 名称过长
pub const ENAMETOOLONG: i32 = 36;
/// 无数据（属性不存在）
pub const ENODATA: i32 = 61;
/// 不支持的操作
pub const EOPNOTSUPP: i32 = 95;
