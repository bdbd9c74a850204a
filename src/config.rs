//! 链式 xattr 配置
//!
//! 读写双方必须使用相同的块大小，否则读端无法正确识别链的结尾。
//! 默认值即为可互通的标准取值。

use crate::{
    consts::*,
    error::{Error, ErrorKind, Result},
    types::ChunkSize,
};

/// 链式 xattr 配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// 逻辑属性名最大长度（字节）
    pub max_name_len: usize,
    /// 大块大小
    pub max_block_len: usize,
    /// 小块大小
    pub short_block_len: usize,
    /// 短值阈值
    pub short_len_threshold: usize,
    /// 自增长读取的初始缓冲区大小
    pub initial_buf_len: usize,
    /// 自增长读取的上限
    pub max_value_len: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            max_name_len: CHAIN_XATTR_MAX_NAME_LEN,
            max_block_len: CHAIN_XATTR_MAX_BLOCK_LEN,
            short_block_len: CHAIN_XATTR_SHORT_BLOCK_LEN,
            short_len_threshold: CHAIN_XATTR_SHORT_LEN_THRESHOLD,
            initial_buf_len: CHAIN_XATTR_INITIAL_BUF_LEN,
            max_value_len: CHAIN_XATTR_MAX_VALUE_LEN,
        }
    }
}

impl ChainConfig {
    /// 设置两种块大小
    pub fn with_block_lens(mut self, short_block_len: usize, max_block_len: usize) -> Self {
        self.short_block_len = short_block_len;
        self.max_block_len = max_block_len;
        self
    }

    /// 设置短值阈值
    pub fn with_short_len_threshold(mut self, threshold: usize) -> Self {
        self.short_len_threshold = threshold;
        self
    }

    /// 设置逻辑名称最大长度
    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }

    /// 设置自增长读取的初始大小和上限
    pub fn with_growth(mut self, initial_buf_len: usize, max_value_len: usize) -> Self {
        self.initial_buf_len = initial_buf_len;
        self.max_value_len = max_value_len;
        self
    }

    /// 检查配置是否自洽
    pub fn validate(&self) -> Result<()> {
        if self.max_name_len == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "max_name_len must be non-zero"));
        }
        if self.short_block_len == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "short_block_len must be non-zero"));
        }
        if self.short_block_len >= self.max_block_len {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "short_block_len must be smaller than max_block_len",
            ));
        }
        if self.initial_buf_len == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "initial_buf_len must be non-zero"));
        }
        if self.max_value_len < self.initial_buf_len {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "max_value_len must not be below initial_buf_len",
            ));
        }
        Ok(())
    }

    /// 物理键长度上限（名称全部转义并带后缀）
    pub fn raw_name_len(&self) -> usize {
        self.max_name_len * 2 + 16
    }

    /// 块大小类别对应的字节数
    pub fn block_len(&self, size: ChunkSize) -> usize {
        match size {
            ChunkSize::Short => self.short_block_len,
            ChunkSize::Max => self.max_block_len,
        }
    }

    /// 长度是否恰好等于某个块大小（意味着后面可能还有 chunk）
    #[inline]
    pub fn is_full_block(&self, len: usize) -> bool {
        len == self.max_block_len || len == self.short_block_len
    }
}
