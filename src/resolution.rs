//! 像素分辨率换算模块
//!
//! GeoTIFF 的 ModelPixelScale 以度为单位描述地理坐标系下的像素大小,而调用方通常只知道
//! 每个像素在地面上覆盖的米数。本模块根据原点和图像尺寸计算栅格右下角的大地坐标,
//! 再由实际的经纬度范围得到每像素的度数。
//!
//! 经度方向每度对应的距离随纬度变化,因此结果总是由实际的大地范围求得,
//! 而不是直接由米数线性换算。
//!
//! # 示例
//!
//! ```
//! use geotiff_save::geodetic::GeodeticCoordinate;
//! use geotiff_save::resolution::{convert, MetersPerPixel};
//!
//! let origin = GeodeticCoordinate::from_degrees(-123.1, 49.25, 0.0);
//! let conversion = convert(origin, MetersPerPixel::new(10.0, 10.0), 512, 512).unwrap();
//! assert!(conversion.resolution.latitude > 0.0);
//! ```

use crate::geodetic::{GeodeticCoordinate, GeodeticError, GeodeticTransform, Ned, Wgs84};
use std::f64::consts::PI;
use thiserror::Error;

/// 分辨率换算错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// 宽度或高度为零
    #[error("invalid raster dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// 求右下角坐标时坐标变换失败
    #[error(transparent)]
    Transform(#[from] GeodeticError),
}

/// 每像素覆盖的地面距离(米)
///
/// 允许为负值,表示轴方向翻转。
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetersPerPixel {
    pub x: f64,
    pub y: f64,
}

impl MetersPerPixel {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 每像素覆盖的经纬度(度)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DegreesPerPixel {
    /// 每像素经度跨度
    pub longitude: f64,
    /// 每像素纬度跨度
    pub latitude: f64,
}

impl DegreesPerPixel {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// 由原点和右下角的大地坐标求每像素度数
    ///
    /// 经度差按最短方向取值并归入 [-180°, 180°),栅格跨越 ±180° 经线时结果仍然连续。
    ///
    /// # 参数
    /// * `origin` - 左上角像素的左上角坐标
    /// * `corner` - 栅格右下角坐标
    /// * `width` - 宽度(像素)
    /// * `height` - 高度(像素)
    pub fn from_extent(
        origin: GeodeticCoordinate,
        corner: GeodeticCoordinate,
        width: u32,
        height: u32,
    ) -> Result<Self, ResolutionError> {
        check_dimensions(width, height)?;
        Ok(Self {
            longitude: wrap_angle(corner.longitude - origin.longitude) * (180.0 / PI)
                / width as f64,
            latitude: (corner.latitude - origin.latitude) * (180.0 / PI) / height as f64,
        })
    }

    /// 由分辨率反推栅格右下角坐标
    ///
    /// 这是 [`DegreesPerPixel::from_extent`] 的逆运算,高程沿用原点的高程,
    /// 经度归入 [-180°, 180°)。
    pub fn implied_corner(
        &self,
        origin: GeodeticCoordinate,
        width: u32,
        height: u32,
    ) -> GeodeticCoordinate {
        GeodeticCoordinate {
            longitude: wrap_angle(
                origin.longitude + (self.longitude * width as f64).to_radians(),
            ),
            latitude: origin.latitude + (self.latitude * height as f64).to_radians(),
            altitude: origin.altitude,
        }
    }

    /// 检查两个分量是否为有限数
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }
}

/// 分辨率换算结果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conversion {
    /// 每像素度数
    pub resolution: DegreesPerPixel,
    /// 栅格右下角的大地坐标
    pub lower_right: GeodeticCoordinate,
}

/// 使用 WGS84 椭球体换算分辨率
///
/// 参见 [`convert_with`]。
pub fn convert(
    origin: GeodeticCoordinate,
    meters: MetersPerPixel,
    width: u32,
    height: u32,
) -> Result<Conversion, ResolutionError> {
    convert_with(&Wgs84::default(), origin, meters, width, height)
}

/// 使用指定的大地坐标变换换算分辨率
///
/// 北向位移为 `meters.x * height`,东向位移为 `meters.y * width`。
/// 经度分辨率因此跟随 `meters.y` 的符号,纬度分辨率跟随 `meters.x` 的符号。
///
/// # 错误
/// - 宽度或高度为零时返回 [`ResolutionError::InvalidDimensions`]
/// - 坐标变换失败时返回 [`ResolutionError::Transform`]
pub fn convert_with<T: GeodeticTransform>(
    transform: &T,
    origin: GeodeticCoordinate,
    meters: MetersPerPixel,
    width: u32,
    height: u32,
) -> Result<Conversion, ResolutionError> {
    check_dimensions(width, height)?;

    let displacement = Ned::new(meters.x * height as f64, meters.y * width as f64, 0.0);
    let lower_right = transform.ned_to_geodetic(displacement, origin)?;
    let resolution = DegreesPerPixel::from_extent(origin, lower_right, width, height)?;

    Ok(Conversion {
        resolution,
        lower_right,
    })
}

/// 角度归入 [-π, π)
fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

fn check_dimensions(width: u32, height: u32) -> Result<(), ResolutionError> {
    if width == 0 || height == 0 {
        Err(ResolutionError::InvalidDimensions { width, height })
    } else {
        Ok(())
    }
}
