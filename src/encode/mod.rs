//! GeoTIFF 编码模块
//!
//! 本模块定义了保存流程使用的编码器接口 [`RasterEncoder`],以及基于 tiff 库的默认实现
//! [`GeoTiffEncoder`]。
//!
//! 编码器接收的栅格通道顺序已经是 RGB / RGBA,分辨率已经换算为每像素度数,
//! 编码器只负责把它们原样写出。
//!
//! # 示例
//!
//! ```no_run
//! use geotiff_save::encode::{GeoTiffEncoder, RasterEncoder, SupportedCompression};
//! use geotiff_save::geodetic::GeodeticCoordinate;
//! use geotiff_save::raster::{ChannelLayout, Raster};
//! use geotiff_save::resolution::DegreesPerPixel;
//! use std::path::Path;
//!
//! let encoder = GeoTiffEncoder::new().with_compression(SupportedCompression::Deflate);
//! let raster = Raster::blank((256, 256), ChannelLayout::Gray)?;
//! encoder.encode(
//!     Path::new("output.tif"),
//!     &raster,
//!     &GeodeticCoordinate::from_degrees(-123.1, 49.25, 0.0),
//!     &DegreesPerPixel::new(1e-4, 1e-4),
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::geodetic::GeodeticCoordinate;
use crate::geotags::GeoTags;
use crate::raster::{ChannelLayout, Raster};
use crate::resolution::DegreesPerPixel;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use tiff::encoder::colortype::{Gray8, RGB8, RGBA8};
use tiff::encoder::{Compression, DeflateLevel, TiffEncoder, TiffKind};
use tracing::*;

pub mod error;

pub use error::{EncodeError, EncodeResult};

/// 栅格编码器
///
/// 保存流程把通道顺序已修正的栅格、原点坐标以及每像素度数交给编码器,
/// 由编码器写出文件。实现不应修改这些参数。
pub trait RasterEncoder {
    /// 将栅格写入 `path`
    ///
    /// # 参数
    ///
    /// * `path` - 输出文件路径
    /// * `raster` - RGB / RGBA 顺序的 8 位栅格
    /// * `origin` - 左上角像素左上角的大地坐标(弧度)
    /// * `resolution` - 每像素度数
    fn encode(
        &self,
        path: &Path,
        raster: &Raster,
        origin: &GeodeticCoordinate,
        resolution: &DegreesPerPixel,
    ) -> EncodeResult<()>;
}

impl<E: RasterEncoder + ?Sized> RasterEncoder for &E {
    fn encode(
        &self,
        path: &Path,
        raster: &Raster,
        origin: &GeodeticCoordinate,
        resolution: &DegreesPerPixel,
    ) -> EncodeResult<()> {
        (**self).encode(path, raster, origin, resolution)
    }
}

impl<E: RasterEncoder + ?Sized> RasterEncoder for Box<E> {
    fn encode(
        &self,
        path: &Path,
        raster: &Raster,
        origin: &GeodeticCoordinate,
        resolution: &DegreesPerPixel,
    ) -> EncodeResult<()> {
        (**self).encode(path, raster, origin, resolution)
    }
}

/// 编码器支持的压缩方式
///
/// * `Uncompressed` - 不压缩
/// * `Lzw` - LZW 无损压缩
/// * `Deflate` - Deflate/ZIP 压缩
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SupportedCompression {
    /// 不进行压缩
    #[default]
    Uncompressed,

    /// LZW 无损压缩算法
    Lzw,

    /// Deflate/ZIP 压缩算法
    Deflate,
}

impl From<SupportedCompression> for Compression {
    fn from(value: SupportedCompression) -> Self {
        match value {
            SupportedCompression::Uncompressed => Compression::Uncompressed,
            SupportedCompression::Lzw => Compression::Lzw,
            SupportedCompression::Deflate => Compression::Deflate(DeflateLevel::Fast),
        }
    }
}

/// 基于 tiff 库的 GeoTIFF 编码器
///
/// 写出单条带(strip)的 8 位灰度、RGB 或 RGBA 图像,并附带 WGS84 地理坐标系的
/// GeoTIFF 标签。
///
/// 分辨率原样写入 ModelPixelScale,符号不做调整。纬度分辨率为正时,
/// 按 GeoTIFF 约定读取的图像会从原点向南展开,参见 [`GeoTags::wgs84`]。
///
/// # 字段说明
///
/// * `compression` - 压缩方式,默认不压缩
/// * `big_tiff` - 是否使用 BigTIFF 格式,默认否
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoTiffEncoder {
    compression: SupportedCompression,
    big_tiff: bool,
}

impl GeoTiffEncoder {
    /// 使用默认参数创建编码器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置压缩方式
    pub fn with_compression(mut self, compression: SupportedCompression) -> Self {
        self.compression = compression;
        self
    }

    /// 设置是否使用 BigTIFF 格式
    ///
    /// # 参数
    ///
    /// * `big` - true 表示使用 BigTIFF,false 表示使用标准 TIFF
    pub fn with_big_tiff(mut self, big: bool) -> Self {
        self.big_tiff = big;
        self
    }

    /// 当前压缩方式
    pub fn compression(&self) -> SupportedCompression {
        self.compression
    }

    /// 是否使用 BigTIFF 格式
    pub fn big_tiff(&self) -> bool {
        self.big_tiff
    }

    /// 将栅格编码到任意实现了 Write + Seek 的输出目标
    ///
    /// # 错误
    ///
    /// - 栅格通道数不是 1、3、4
    /// - 原点或分辨率不是有限数
    /// - IO 错误或 tiff 库编码错误
    pub fn encode_to<W: Write + Seek>(
        &self,
        writer: W,
        raster: &Raster,
        origin: &GeodeticCoordinate,
        resolution: &DegreesPerPixel,
    ) -> EncodeResult<()> {
        let layout = raster.layout()?;

        if !origin.is_finite() {
            return Err(EncodeError::InvalidGeoreference(format!(
                "origin is not finite: {origin:?}"
            )));
        }
        if !resolution.is_finite() {
            return Err(EncodeError::InvalidGeoreference(format!(
                "resolution is not finite: {resolution:?}"
            )));
        }

        let tags = GeoTags::wgs84(*origin, *resolution);
        debug!(
            "编码 {raster}, 压缩 {:?}, BigTIFF {}",
            self.compression, self.big_tiff
        );

        if self.big_tiff {
            let encoder = TiffEncoder::new_big(writer)?.with_compression(self.compression.into());
            write_image(encoder, raster, layout, &tags)
        } else {
            let encoder = TiffEncoder::new(writer)?.with_compression(self.compression.into());
            write_image(encoder, raster, layout, &tags)
        }
    }

    /// 将栅格编码为内存中的 GeoTIFF 字节
    pub fn encode_to_vec(
        &self,
        raster: &Raster,
        origin: &GeodeticCoordinate,
        resolution: &DegreesPerPixel,
    ) -> EncodeResult<Vec<u8>> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        self.encode_to(&mut buffer, raster, origin, resolution)?;
        Ok(buffer.into_inner())
    }
}

impl RasterEncoder for GeoTiffEncoder {
    fn encode(
        &self,
        path: &Path,
        raster: &Raster,
        origin: &GeodeticCoordinate,
        resolution: &DegreesPerPixel,
    ) -> EncodeResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.encode_to(&mut writer, raster, origin, resolution)?;
        writer.flush()?;
        Ok(())
    }
}

fn write_image<W: Write + Seek, K: TiffKind>(
    mut encoder: TiffEncoder<W, K>,
    raster: &Raster,
    layout: ChannelLayout,
    tags: &GeoTags,
) -> EncodeResult<()> {
    let (width, height) = raster.dimensions;

    match layout {
        ChannelLayout::Gray => {
            let mut image = encoder.new_image::<Gray8>(width, height)?;
            tags.write_to(image.encoder())?;
            image.write_data(raster.as_bytes())?;
        }
        ChannelLayout::Rgb => {
            let mut image = encoder.new_image::<RGB8>(width, height)?;
            tags.write_to(image.encoder())?;
            image.write_data(raster.as_bytes())?;
        }
        ChannelLayout::Rgba => {
            let mut image = encoder.new_image::<RGBA8>(width, height)?;
            tags.write_to(image.encoder())?;
            image.write_data(raster.as_bytes())?;
        }
    }
    Ok(())
}
