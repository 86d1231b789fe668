//! 大地坐标模块
//!
//! 本模块提供了保存 GeoTIFF 时所需的大地坐标计算功能。
//! 主要包含以下功能:
//!
//! - 大地坐标(经度、纬度、高程)的表示
//! - 北-东-地(NED)局部切平面位移
//! - 大地坐标与地心地固(ECEF)坐标之间的转换(由 proj4rs 完成)
//! - 以某一原点为中心的 NED 位移到大地坐标的转换
//!
//! 坐标变换通过 [`GeodeticTransform`] 抽象,默认实现为 [`Wgs84`]。

use proj4rs::errors::Error as Proj4Error;
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use std::fmt::Display;
use thiserror::Error;

mod ellipsoid;

pub use ellipsoid::{Ellipsoid, WGS84};

/// 大地坐标
///
/// 经度和纬度以弧度表示,高程以米表示。
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeodeticCoordinate {
    /// 经度(弧度)
    pub longitude: f64,
    /// 纬度(弧度)
    pub latitude: f64,
    /// 椭球高(米)
    pub altitude: f64,
}

impl GeodeticCoordinate {
    /// 创建一个新的大地坐标
    ///
    /// # 参数
    /// * `longitude` - 经度(弧度)
    /// * `latitude` - 纬度(弧度)
    /// * `altitude` - 椭球高(米)
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
        }
    }

    /// 由以度为单位的经纬度创建大地坐标
    pub fn from_degrees(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self::new(longitude.to_radians(), latitude.to_radians(), altitude)
    }

    /// 经度(度)
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude.to_degrees()
    }

    /// 纬度(度)
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude.to_degrees()
    }

    /// 检查所有分量是否为有限数
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite() && self.altitude.is_finite()
    }
}

impl Display for GeodeticCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.8}°, {:.8}°, {}m)",
            self.longitude_degrees(),
            self.latitude_degrees(),
            self.altitude
        )
    }
}

/// 北-东-地局部切平面位移(米)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ned {
    pub north: f64,
    pub east: f64,
    pub down: f64,
}

impl Ned {
    pub fn new(north: f64, east: f64, down: f64) -> Self {
        Self { north, east, down }
    }
}

/// 地心地固坐标(米)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ecef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 坐标变换错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeodeticError {
    /// proj4rs 报告的变换失败
    #[error("geodetic transform failed: {0}")]
    Transform(String),
}

impl From<Proj4Error> for GeodeticError {
    fn from(e: Proj4Error) -> Self {
        GeodeticError::Transform(e.to_string())
    }
}

/// 坐标变换的通用结果类型
pub type GeodeticResult<T> = Result<T, GeodeticError>;

/// NED 位移到大地坐标的变换
///
/// 实现必须是无副作用的纯函数。
pub trait GeodeticTransform {
    /// 将以 `origin` 为中心的 NED 位移转换为大地坐标
    fn ned_to_geodetic(
        &self,
        ned: Ned,
        origin: GeodeticCoordinate,
    ) -> GeodeticResult<GeodeticCoordinate>;
}

impl<T: GeodeticTransform + ?Sized> GeodeticTransform for &T {
    fn ned_to_geodetic(
        &self,
        ned: Ned,
        origin: GeodeticCoordinate,
    ) -> GeodeticResult<GeodeticCoordinate> {
        (**self).ned_to_geodetic(ned, origin)
    }
}

/// WGS84 经纬度坐标系
const LONGLAT_WGS84: &str = "+proj=longlat +datum=WGS84";
/// WGS84 地心坐标系
const GEOCENT_WGS84: &str = "+proj=geocent +datum=WGS84";

/// 基于 WGS84 椭球体的大地坐标变换
///
/// 大地坐标与地心地固坐标之间的转换交给 proj4rs,
/// 这里只负责把局部切平面位移旋转到地心坐标系。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wgs84;

impl Wgs84 {
    /// 大地坐标转换为地心地固坐标
    pub fn geodetic_to_ecef(&self, coor: GeodeticCoordinate) -> GeodeticResult<Ecef> {
        let mut point = (coor.longitude, coor.latitude, coor.altitude);

        let from = Proj::from_proj_string(LONGLAT_WGS84)?;
        let to = Proj::from_proj_string(GEOCENT_WGS84)?;
        transform(&from, &to, &mut point)?;

        Ok(Ecef {
            x: point.0,
            y: point.1,
            z: point.2,
        })
    }

    /// 地心地固坐标转换为大地坐标
    pub fn ecef_to_geodetic(&self, ecef: Ecef) -> GeodeticResult<GeodeticCoordinate> {
        let mut point = (ecef.x, ecef.y, ecef.z);

        let from = Proj::from_proj_string(GEOCENT_WGS84)?;
        let to = Proj::from_proj_string(LONGLAT_WGS84)?;
        transform(&from, &to, &mut point)?;

        Ok(GeodeticCoordinate::new(point.0, point.1, point.2))
    }

    /// 将 NED 位移旋转为地心地固坐标系下的位移
    pub fn ned_to_ecef_delta(&self, ned: Ned, origin: GeodeticCoordinate) -> Ecef {
        let (sin_lat, cos_lat) = origin.latitude.sin_cos();
        let (sin_lon, cos_lon) = origin.longitude.sin_cos();

        Ecef {
            x: -sin_lat * cos_lon * ned.north - sin_lon * ned.east - cos_lat * cos_lon * ned.down,
            y: -sin_lat * sin_lon * ned.north + cos_lon * ned.east - cos_lat * sin_lon * ned.down,
            z: cos_lat * ned.north - sin_lat * ned.down,
        }
    }
}

impl GeodeticTransform for Wgs84 {
    fn ned_to_geodetic(
        &self,
        ned: Ned,
        origin: GeodeticCoordinate,
    ) -> GeodeticResult<GeodeticCoordinate> {
        let base = self.geodetic_to_ecef(origin)?;
        let delta = self.ned_to_ecef_delta(ned, origin);
        self.ecef_to_geodetic(Ecef {
            x: base.x + delta.x,
            y: base.y + delta.y,
            z: base.z + delta.z,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_displacement_is_origin() {
        let origin = GeodeticCoordinate::from_degrees(-123.1, 49.25, 70.0);
        let out = Wgs84.ned_to_geodetic(Ned::default(), origin).unwrap();
        assert_relative_eq!(out.longitude, origin.longitude, epsilon = 1e-12);
        assert_relative_eq!(out.latitude, origin.latitude, epsilon = 1e-10);
        assert_relative_eq!(out.altitude, origin.altitude, epsilon = 1e-3);
    }

    #[test]
    fn test_ecef_round_trip() {
        let wgs = Wgs84;
        for (lon, lat, alt) in [
            (0.0, 0.0, 0.0),
            (45.0, 45.0, 1000.0),
            (-170.0, -60.0, -50.0),
            (10.0, 89.9, 0.0),
        ] {
            let coor = GeodeticCoordinate::from_degrees(lon, lat, alt);
            let ecef = wgs.geodetic_to_ecef(coor).unwrap();
            let back = wgs.ecef_to_geodetic(ecef).unwrap();
            assert_relative_eq!(back.longitude, coor.longitude, epsilon = 1e-12);
            assert_relative_eq!(back.latitude, coor.latitude, epsilon = 1e-10);
            assert_relative_eq!(back.altitude, coor.altitude, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_equator_ecef() {
        let ecef = Wgs84.geodetic_to_ecef(GeodeticCoordinate::default()).unwrap();
        assert_relative_eq!(ecef.x, WGS84.a, epsilon = 1e-6);
        assert_relative_eq!(ecef.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ecef.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_north_and_east_at_equator() {
        let wgs = Wgs84;
        let origin = GeodeticCoordinate::default();

        // 赤道处子午圈曲率半径 M = a(1 - e^2)
        let north = wgs.ned_to_geodetic(Ned::new(1000.0, 0.0, 0.0), origin).unwrap();
        assert_relative_eq!(
            north.latitude,
            1000.0 / (WGS84.a * (1.0 - WGS84.eccentricity_squared())),
            max_relative = 1e-6
        );
        assert_relative_eq!(north.longitude, 0.0, epsilon = 1e-12);

        let east = wgs.ned_to_geodetic(Ned::new(0.0, 1000.0, 0.0), origin).unwrap();
        assert_relative_eq!(east.longitude, 1000.0 / WGS84.a, max_relative = 1e-6);
        assert_relative_eq!(east.latitude, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_down_lowers_altitude() {
        let origin = GeodeticCoordinate::from_degrees(12.0, 34.0, 500.0);
        let out = Wgs84.ned_to_geodetic(Ned::new(0.0, 0.0, 100.0), origin).unwrap();
        assert_relative_eq!(out.altitude, 400.0, epsilon = 1e-3);
        assert_relative_eq!(out.latitude, origin.latitude, epsilon = 1e-10);
    }

    #[test]
    fn test_east_across_antimeridian() {
        let origin = GeodeticCoordinate::from_degrees(179.9999, 10.0, 0.0);
        let out = Wgs84.ned_to_geodetic(Ned::new(0.0, 1000.0, 0.0), origin).unwrap();
        // 越过 180° 后经度回到负半轴
        assert!(out.longitude < 0.0);
        assert!(out.longitude_degrees() > -179.999);
    }

    #[test]
    fn test_degree_helpers() {
        let coor = GeodeticCoordinate::from_degrees(-75.5, 40.25, 0.0);
        assert_relative_eq!(coor.longitude_degrees(), -75.5, epsilon = 1e-12);
        assert_relative_eq!(coor.latitude_degrees(), 40.25, epsilon = 1e-12);
        assert!(coor.is_finite());
        assert!(!GeodeticCoordinate::new(f64::NAN, 0.0, 0.0).is_finite());
    }
}
