//! 本模块提供了 Raster 与 image 库的 DynamicImage 之间的转换功能。
//!
//! image 库按 RGB / RGBA 顺序存储像素,Raster 按 BGR / BGRA 顺序存储,
//! 转换时会交换第 0 和第 2 通道。

#![cfg(feature = "image")]

use super::{ChannelLayout, Raster, RasterError};
use image::{DynamicImage, ImageBuffer};

impl Raster {
    /// 从 DynamicImage 创建 Raster
    ///
    /// 8 位灰度、RGB、RGBA 图像直接转换,其他格式先转换为 RGBA8。
    pub fn from_image(img: &DynamicImage) -> Result<Self, RasterError> {
        let dimensions = (img.width(), img.height());

        // 根据不同的 DynamicImage 类型确定通道数
        let (channels, buffer) = match img {
            DynamicImage::ImageLuma8(ib) => (1, ib.as_raw().clone()),
            DynamicImage::ImageRgb8(ib) => (3, ib.as_raw().clone()),
            DynamicImage::ImageRgba8(ib) => (4, ib.as_raw().clone()),
            other => (4, other.to_rgba8().into_raw()),
        };

        let mut raster = Self::new(dimensions, channels, buffer)?;
        raster.swap_red_blue();
        Ok(raster)
    }

    /// 将 Raster 转换为 DynamicImage
    ///
    /// # 返回值
    /// 成功时返回 `Ok(DynamicImage)`,失败时返回 `Err(RasterError)`
    pub fn into_image(mut self) -> Result<DynamicImage, RasterError> {
        let layout = self.layout()?;
        self.swap_red_blue();
        let Raster {
            dimensions: (width, height),
            buffer,
            ..
        } = self;
        let len = buffer.len();

        match layout {
            ChannelLayout::Gray => {
                ImageBuffer::from_raw(width, height, buffer).map(DynamicImage::ImageLuma8)
            }
            ChannelLayout::Rgb => {
                ImageBuffer::from_raw(width, height, buffer).map(DynamicImage::ImageRgb8)
            }
            ChannelLayout::Rgba => {
                ImageBuffer::from_raw(width, height, buffer).map(DynamicImage::ImageRgba8)
            }
        }
        .ok_or(RasterError::BufferSize(len, (width, height), layout.channels()))
    }
}
