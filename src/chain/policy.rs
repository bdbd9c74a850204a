//! chunk 块大小策略

use crate::{config::ChainConfig, error::Result, types::ChunkSize};

/// 根据值的总长度选择块大小类别
///
/// 短值使用小块，这样它们可以和 inode 内联存放，
/// 不会被文件系统挤出到外部 xattr 块。一次写入只选择一次。
pub fn choose_chunk_size(config: &ChainConfig, total_len: usize) -> ChunkSize {
    if total_len <= config.short_len_threshold {
        ChunkSize::Short
    } else {
        ChunkSize::Max
    }
}

/// 根据值的总长度得到块大小（字节）
#[inline]
pub fn get_xattr_block_size(config: &ChainConfig, total_len: usize) -> usize {
    config.block_len(choose_chunk_size(config, total_len))
}

/// 值需要的 chunk 数（空值也占一个 chunk 0）
///
/// 配置不合法（块大小为 0）时返回 `InvalidInput`
pub fn chunk_count(config: &ChainConfig, total_len: usize) -> Result<usize> {
    config.validate()?;
    let block = get_xattr_block_size(config, total_len);
    if total_len == 0 {
        Ok(1)
    } else {
        Ok(total_len.div_ceil(block))
    }
}
