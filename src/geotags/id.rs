//! GeoTIFF 标识符模块
//!
//! 本模块定义了写出 WGS84 地理坐标 GeoTIFF 所用到的 TIFF 标签代码、GeoKey 标识符
//! 以及部分 GeoKey 的取值。实现基于 OGC GeoTIFF 1.1 标准 (OGC 19-008r4)。
//!
//! # 参考标准
//!
//! - [GeoKey ID 和名称摘要](https://docs.ogc.org/is/19-008r4/19-008r4.html#_summary_of_geokey_ids_and_names)
//! - [坐标转换 GeoTIFF 标签](https://docs.ogc.org/is/19-008r4/19-008r4.html#_geotiff_tags_for_coordinate_transformations)
//!
//! # 示例
//!
//! ```
//! use geotiff_save::geotags::GeoKeyId;
//!
//! let key = GeoKeyId::GeographicTypeGeoKey;
//! assert_eq!(u16::from(key), 2048);
//! ```

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// GeoTIFF 专用的 TIFF 标签代码
///
/// 这些标签不在 tiff 库的标准标签列表中,写出时使用 `Tag::Unknown`。
#[derive(Debug, PartialEq, Eq, Clone, Copy, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum GeoTiffTag {
    /// 像素比例 [ScaleX, ScaleY, ScaleZ]
    ModelPixelScale = 33550,
    /// 参考点 [I, J, K, X, Y, Z]
    ModelTiepoint = 33922,
    /// GeoKey 目录
    GeoKeyDirectory = 34735,
    /// 双精度参数
    GeoDoubleParams = 34736,
    /// ASCII 参数
    GeoAsciiParams = 34737,
}

/// GeoTIFF GeoKey 标识符
///
/// ## 模型和栅格类型键 (1024-1025)
/// * `GTModelTypeGeoKey` (1024) - 整体坐标系统类型
/// * `GTRasterTypeGeoKey` (1025) - 栅格数据解释方式
///
/// ## 地理坐标系统键 (2048-2059)
/// * `GeographicTypeGeoKey` (2048) - 地理坐标系统代码
/// * `GeogCitationGeoKey` (2049) - 地理坐标系统的文本描述
/// * `GeogAngularUnitsGeoKey` (2054) - 角度单位
/// * `GeogSemiMajorAxisGeoKey` (2057) - 椭球体长半轴
/// * `GeogInvFlatteningGeoKey` (2059) - 椭球体反扁率
#[derive(Debug, PartialEq, Eq, Clone, Copy, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum GeoKeyId {
    /// 整体坐标系统类型
    GTModelTypeGeoKey = 1024,

    /// 栅格数据的空间解释方式
    GTRasterTypeGeoKey = 1025,

    /// 地理坐标系统代码（如 EPSG 代码）
    GeographicTypeGeoKey = 2048,

    /// 地理坐标系统的文本描述
    GeogCitationGeoKey = 2049,

    /// 角度单位代码（如度、弧度）
    GeogAngularUnitsGeoKey = 2054,

    /// 椭球体长半轴长度
    GeogSemiMajorAxisGeoKey = 2057,

    /// 椭球体反扁率
    GeogInvFlatteningGeoKey = 2059,
}

/// GTModelTypeGeoKey 的取值
///
/// 只写出地理坐标系模型。
#[derive(Debug, PartialEq, Eq, Clone, Copy, IntoPrimitive)]
#[repr(u16)]
pub enum ModelType {
    Geographic = 2,
}

/// GTRasterTypeGeoKey 的取值
#[derive(Debug, PartialEq, Eq, Clone, Copy, IntoPrimitive)]
#[repr(u16)]
pub enum RasterType {
    /// 像素表示一块区域,参考点位于像素左上角
    PixelIsArea = 1,
    /// 像素表示一个点
    PixelIsPoint = 2,
}

/// EPSG:4326 (WGS 84)
pub const EPSG_WGS84: u16 = 4326;

/// EPSG 角度单位: 度
pub const ANGULAR_UNIT_DEGREE: u16 = 9102;
