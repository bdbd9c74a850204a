//! 公共数据类型

use bitflags::bitflags;

/// 文件描述符
pub type RawFd = i32;

bitflags! {
    /// 设置属性时的标志
    ///
    /// `CREATE`/`REPLACE` 会传递给底层原语（仅作用于 chunk 0），
    /// 其余标志只影响链式写入逻辑本身。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SetFlags: u32 {
        /// 属性必须不存在
        const CREATE              = 0x01;
        /// 属性必须已存在
        const REPLACE             = 0x02;
        /// 写入后不清理多余的尾部 chunk（调用方确认属性是新建的）
        const SKIP_CHAIN_CLEANUP  = 0x100;
        /// 整个值写进 chunk 0，底层放不下时返回底层的错误
        const ENSURE_SINGLE_ATTR  = 0x200;
    }
}

impl SetFlags {
    /// 只保留底层原语能理解的标志
    pub fn primitive(self) -> Self {
        self & (SetFlags::CREATE | SetFlags::REPLACE)
    }
}

/// chunk 块大小类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSize {
    /// 小块（短值使用）
    Short,
    /// 大块
    Max,
}
