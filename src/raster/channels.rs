//! 通道顺序转换
//!
//! 内存中的彩色栅格按 BGR / BGRA 顺序存储,而 GeoTIFF 编码器把 3 通道数据解释为 RGB,
//! 把 4 通道数据解释为 RGBA。本模块负责在写出前交换第 0 和第 2 通道。

use super::{ChannelLayout, Raster, RasterError};
use std::borrow::Cow;
use tracing::*;

/// 生成通道顺序符合编码器要求的栅格
///
/// - 灰度图像直接借用原栅格,不做任何复制
/// - 3 通道和 4 通道图像返回一份交换了第 0 和第 2 通道的独立副本
///
/// # 错误
/// - 通道数不是 1、3、4 时返回 [`RasterError::UnsupportedChannelLayout`]
/// - 副本分配失败时返回 [`RasterError::Allocation`]
pub fn adapt_channel_order(raster: &Raster) -> Result<Cow<'_, Raster>, RasterError> {
    match raster.layout()? {
        ChannelLayout::Gray => Ok(Cow::Borrowed(raster)),
        ChannelLayout::Rgb | ChannelLayout::Rgba => {
            let mut buffer = Vec::new();
            buffer.try_reserve_exact(raster.buffer.len())?;
            buffer.extend_from_slice(&raster.buffer);

            let mut copy = Raster {
                dimensions: raster.dimensions,
                channels: raster.channels,
                buffer,
            };
            copy.swap_red_blue();
            trace!("通道顺序已转换: {copy}");
            Ok(Cow::Owned(copy))
        }
    }
}

impl Raster {
    /// 原地交换每个像素的第 0 和第 2 通道
    ///
    /// 少于 3 个通道时不做任何操作。
    pub fn swap_red_blue(&mut self) {
        if self.channels < 3 {
            return;
        }
        for pixel in self.buffer.chunks_exact_mut(self.channels) {
            pixel.swap(0, 2);
        }
    }
}
