//! 这是一个把内存中的 8 位栅格保存为 GeoTIFF 的库
//!
//! 调用方提供左上角像素的大地坐标和每像素覆盖的地面米数,库负责:
//! - 将每像素米数换算为 GeoTIFF 需要的每像素度数
//! - 把 BGR / BGRA 顺序的彩色栅格转换为编码器要求的 RGB / RGBA 顺序
//! - 写出带 WGS84 地理坐标系标签的 GeoTIFF 文件
//!
//! # 主要模块
//! - [`resolution`] - 分辨率换算
//! - [`raster`] - 栅格容器和通道顺序转换
//! - [`encode`] - 编码器接口和基于 tiff 库的默认实现
//! - [`save`] - 保存流程
//!
//! # 示例
//! ```no_run
//! use geotiff_save::{save, ChannelLayout, GeodeticCoordinate, MetersPerPixel, Raster};
//!
//! let image = Raster::blank((1024, 768), ChannelLayout::Rgba)?;
//! let origin = GeodeticCoordinate::from_degrees(-123.1, 49.25, 70.0);
//! save("scene.tif", &image, origin, MetersPerPixel::new(0.1, 0.1))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod encode; // 编码相关功能
pub mod error; // 保存流程错误
pub mod geodetic; // 大地坐标变换
pub mod geotags; // 地理标签处理
pub mod raster; // 栅格数据处理
pub mod resolution; // 分辨率换算
pub mod save; // 保存流程

// 重新导出常用类型
pub use encode::{EncodeError, GeoTiffEncoder, RasterEncoder, SupportedCompression};
pub use error::{SaveError, SaveResult};
pub use geodetic::{GeodeticCoordinate, GeodeticError, GeodeticTransform, Ned, Wgs84};
pub use raster::{adapt_channel_order, ChannelLayout, Raster, RasterError};
pub use resolution::{convert, convert_with, DegreesPerPixel, MetersPerPixel, ResolutionError};
pub use save::{save, save_with, Saver};
