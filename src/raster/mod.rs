//! 栅格图像模块
//!
//! 本模块提供了保存 GeoTIFF 所需的最小栅格容器: 8 位采样、交错存储、按行排列。
//! 彩色图像在内存中按 BGR / BGRA 顺序存储,写出前由 [`adapt_channel_order`]
//! 转换为编码器要求的 RGB / RGBA 顺序。

use std::collections::TryReserveError;
use std::fmt::Display;
use thiserror::Error;

mod channels;
mod image;

pub use channels::adapt_channel_order;

/// 栅格操作过程中可能出现的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// 缓冲区大小不匹配
    /// 包含 (实际大小, (宽度, 高度), 通道数)
    #[error("buffer of {0} bytes does not match {1:?} with {2} channels")]
    BufferSize(usize, (u32, u32), usize),
    /// 通道数为零
    #[error("raster must have at least one channel")]
    ZeroChannels,
    /// 不支持的通道布局,只支持 1、3、4 通道
    #[error("unsupported channel layout with {0} channels")]
    UnsupportedChannelLayout(usize),
    /// 复制缓冲区时内存分配失败
    #[error("failed to allocate raster copy: {0}")]
    Allocation(#[from] TryReserveError),
}

/// 通道布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// 单通道灰度
    Gray,
    /// 三通道彩色
    Rgb,
    /// 四通道彩色 + alpha
    Rgba,
}

impl ChannelLayout {
    /// 根据通道数确定布局
    pub fn from_channels(channels: usize) -> Result<Self, RasterError> {
        match channels {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(RasterError::UnsupportedChannelLayout(n)),
        }
    }

    /// 每像素通道数
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// 表示一个 8 位栅格图像
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// 图像尺寸 (宽度, 高度)
    pub dimensions: (u32, u32),
    /// 每像素通道数
    channels: usize,
    /// 图像数据缓冲区
    pub(crate) buffer: Vec<u8>,
}

impl Raster {
    /// 创建一个新的 Raster 实例
    ///
    /// # 参数
    /// * `dimensions` - 图像尺寸 (宽度, 高度)
    /// * `channels` - 每像素通道数
    /// * `buffer` - 图像数据缓冲区,长度必须为 宽度 * 高度 * 通道数
    ///
    /// # 返回
    /// * `Result<Self, RasterError>` - 成功则返回 Raster 实例,失败则返回错误
    pub fn new(
        dimensions: (u32, u32),
        channels: usize,
        buffer: Vec<u8>,
    ) -> Result<Self, RasterError> {
        if channels == 0 {
            return Err(RasterError::ZeroChannels);
        }

        // 检查缓冲区大小是否正确
        match required_bytes(dimensions, channels) {
            Some(required) if required == buffer.len() => Ok(Self {
                dimensions,
                channels,
                buffer,
            }),
            _ => Err(RasterError::BufferSize(buffer.len(), dimensions, channels)),
        }
    }

    /// 创建一个填充为 0 的 Raster 实例
    ///
    /// 尺寸乘积溢出时返回 [`RasterError::BufferSize`]。
    pub fn blank(dimensions: (u32, u32), layout: ChannelLayout) -> Result<Self, RasterError> {
        let channels = layout.channels();
        let Some(len) = required_bytes(dimensions, channels) else {
            return Err(RasterError::BufferSize(0, dimensions, channels));
        };
        Ok(Self {
            dimensions,
            channels,
            buffer: vec![0; len],
        })
    }

    /// 宽度(像素)
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    /// 高度(像素)
    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    /// 每像素通道数
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 通道布局
    pub fn layout(&self) -> Result<ChannelLayout, RasterError> {
        ChannelLayout::from_channels(self.channels)
    }

    /// 图像数据
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// 取出图像数据
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// 缓冲区是否为空
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// 计算每行的字节数
    pub fn row_size(&self) -> usize {
        self.dimensions.0 as usize * self.channels
    }

    /// 获取指定位置的像素值
    ///
    /// # 返回
    /// * `Option<&[u8]>` - 如果坐标有效,返回像素值;否则返回 None
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let start = self.pixel_offset(x, y)?;
        Some(&self.buffer[start..start + self.channels])
    }

    /// 设置指定位置的像素值
    ///
    /// # 返回
    /// * `Result<(), String>` - 成功则返回 Ok(()), 失败则返回错误信息
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) -> Result<(), String> {
        let Some(start) = self.pixel_offset(x, y) else {
            return Err(format!("invalid pixel index ({x}, {y})"));
        };
        if pixel.len() != self.channels {
            return Err(format!(
                "pixel has {} samples, expected {}",
                pixel.len(),
                self.channels
            ));
        }
        self.buffer[start..start + self.channels].copy_from_slice(pixel);
        Ok(())
    }

    fn pixel_offset(&self, x: u32, y: u32) -> Option<usize> {
        // 检查坐标是否在图像范围内
        if x >= self.dimensions.0 || y >= self.dimensions.1 {
            return None;
        }
        Some(y as usize * self.row_size() + x as usize * self.channels)
    }
}

/// 宽度 * 高度 * 通道数,溢出时返回 None
fn required_bytes(dimensions: (u32, u32), channels: usize) -> Option<usize> {
    (dimensions.0 as usize)
        .checked_mul(dimensions.1 as usize)?
        .checked_mul(channels)
}

/// 实现 Display trait,用于格式化输出 Raster 信息
impl Display for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Raster({}x{}, {}通道, {}字节)",
            self.dimensions.0,
            self.dimensions.1,
            self.channels,
            self.buffer.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_checked() {
        assert!(Raster::new((2, 2), 3, vec![0; 12]).is_ok());
        assert_eq!(
            Raster::new((2, 2), 3, vec![0; 11]),
            Err(RasterError::BufferSize(11, (2, 2), 3))
        );
        assert_eq!(Raster::new((2, 2), 0, vec![]), Err(RasterError::ZeroChannels));
    }

    #[test]
    fn test_oversized_shape_rejected() {
        let huge = (u32::MAX, u32::MAX);
        assert_eq!(
            Raster::new(huge, 5, vec![]),
            Err(RasterError::BufferSize(0, huge, 5))
        );
        assert_eq!(
            Raster::new(huge, usize::MAX, vec![1, 2, 3]),
            Err(RasterError::BufferSize(3, huge, usize::MAX))
        );
        assert_eq!(
            Raster::blank(huge, ChannelLayout::Rgba),
            Err(RasterError::BufferSize(0, huge, 4))
        );
    }

    #[test]
    fn test_layout_from_channels() {
        assert_eq!(ChannelLayout::from_channels(1), Ok(ChannelLayout::Gray));
        assert_eq!(ChannelLayout::from_channels(3), Ok(ChannelLayout::Rgb));
        assert_eq!(ChannelLayout::from_channels(4), Ok(ChannelLayout::Rgba));
        for n in [0, 2, 5, 16] {
            assert_eq!(
                ChannelLayout::from_channels(n),
                Err(RasterError::UnsupportedChannelLayout(n))
            );
        }
        // 两通道可以构造,但没有对应的布局
        let raster = Raster::new((1, 1), 2, vec![1, 2]).unwrap();
        assert_eq!(raster.layout(), Err(RasterError::UnsupportedChannelLayout(2)));
    }

    #[test]
    fn test_get_and_put_pixel() {
        let mut raster = Raster::blank((3, 2), ChannelLayout::Rgba).unwrap();
        raster.put_pixel(2, 1, &[1, 2, 3, 4]).unwrap();
        assert_eq!(raster.get_pixel(2, 1), Some(&[1, 2, 3, 4][..]));
        assert_eq!(raster.get_pixel(0, 0), Some(&[0, 0, 0, 0][..]));
        assert_eq!(raster.get_pixel(3, 0), None);
        assert!(raster.put_pixel(0, 2, &[0; 4]).is_err());
        assert!(raster.put_pixel(0, 0, &[0; 3]).is_err());
        assert_eq!(&raster.as_bytes()[20..24], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_display() {
        let raster = Raster::blank((4, 2), ChannelLayout::Gray).unwrap();
        assert_eq!(raster.to_string(), "Raster(4x2, 1通道, 8字节)");
    }
}
