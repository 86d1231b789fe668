//! GeoTIFF 地理空间标签模块
//!
//! 本模块构造写入 GeoTIFF 的地理空间元数据,并将其写入 tiff 库的目录编码器。
//! 基于 OGC GeoTIFF 1.1 标准实现。
//!
//! # 主要功能
//!
//! - 比例尺坐标转换模型 - 参考点与像素比例
//! - GeoKey 目录的构造和序列化
//! - WGS84 地理坐标系的标准键集合
//!
//! # 参考标准
//!
//! - [OGC GeoTIFF 1.1 规范](https://docs.ogc.org/is/19-008r4/19-008r4.html)

use crate::geodetic::{GeodeticCoordinate, WGS84};
use crate::resolution::DegreesPerPixel;
use keys::GeoKey;
use std::fmt::Display;
use std::io::{Seek, Write};
use tiff::encoder::{DirectoryEncoder, TiffKind};
use tiff::tags::Tag;
use tiff::TiffError;

mod id;
mod keys;
mod value;

pub use id::{
    GeoKeyId, GeoTiffTag, ModelType, RasterType, ANGULAR_UNIT_DEGREE, EPSG_WGS84,
};
pub use keys::{EncodedDirectory, GeoKeyDirectory};
pub use value::GeoKeyValue;

/// GeoTIFF 地理空间标签集合
///
/// # 示例
///
/// ```
/// use geotiff_save::geodetic::GeodeticCoordinate;
/// use geotiff_save::geotags::GeoTags;
/// use geotiff_save::resolution::DegreesPerPixel;
///
/// let tags = GeoTags::wgs84(
///     GeodeticCoordinate::from_degrees(-180.0, 90.0, 0.0),
///     DegreesPerPixel::new(0.1, 0.1),
/// );
/// assert_eq!(tags.tiepoint[3], -180.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeoTags {
    /// GeoKey 目录
    pub directory: GeoKeyDirectory,
    /// 参考点 [I,J,K, X,Y,Z]
    pub tiepoint: [f64; 6],
    /// 像素比例 [ScaleX, ScaleY, ScaleZ]
    pub pixel_scale: [f64; 3],
}

impl Display for GeoTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "GeoTIFF Tags:")?;
        writeln!(f, "  Tiepoint: {:?}", self.tiepoint)?;
        writeln!(f, "  Pixel Scale: {:?}", self.pixel_scale)?;
        write!(
            f,
            "  Directory: {{version: {}, revision: {}.{}}}",
            self.directory.version, self.directory.revision.0, self.directory.revision.1,
        )?;
        if !self.directory.keys.is_empty() {
            write!(f, "\n  Keys:")?;
            for key in self.directory.keys.iter() {
                write!(f, "\n    {key}")?;
            }
        }
        Ok(())
    }
}

impl GeoTags {
    /// 从参考点和像素比例创建标签
    pub fn from_tiepoint_and_scale(tiepoint: [f64; 6], pixel_scale: [f64; 3]) -> Self {
        Self {
            directory: GeoKeyDirectory::new(),
            tiepoint,
            pixel_scale,
        }
    }

    /// 创建 WGS84 地理坐标系下的标签
    ///
    /// 像素 (0, 0) 的左上角对应 `origin`,像素比例按给定值写入,不改变符号。
    ///
    /// # 注意
    ///
    /// GeoTIFF 约定 ScaleY 为正时行号向南增加,即 Y = 参考点Y - 行号 * ScaleY。
    /// 而 [`crate::resolution::convert`] 在 `meters.x` 为正时把右下角放在原点以北,
    /// 得到的纬度分辨率也为正。GDAL 等读取方会因此把图像放在原点以南,
    /// 与 [`crate::resolution::Conversion::lower_right`] 在南北方向上互为镜像。
    /// 需要两者一致时,应传入负的 `meters.x`。
    ///
    /// # 参数
    ///
    /// * `origin` - 原点大地坐标(弧度)
    /// * `resolution` - 每像素度数
    pub fn wgs84(origin: GeodeticCoordinate, resolution: DegreesPerPixel) -> Self {
        let mut geo = Self::from_tiepoint_and_scale(
            [
                0.0,
                0.0,
                0.0,
                origin.longitude_degrees(),
                origin.latitude_degrees(),
                origin.altitude,
            ],
            [resolution.longitude, resolution.latitude, 0.0],
        );

        geo.set_key(GeoKeyId::GTModelTypeGeoKey, GeoKeyValue::short(ModelType::Geographic));
        geo.set_key(GeoKeyId::GTRasterTypeGeoKey, GeoKeyValue::short(RasterType::PixelIsArea));
        geo.set_key(GeoKeyId::GeographicTypeGeoKey, GeoKeyValue::short(EPSG_WGS84));
        geo.set_key(GeoKeyId::GeogCitationGeoKey, GeoKeyValue::Ascii("WGS 84".into()));
        geo.set_key(GeoKeyId::GeogAngularUnitsGeoKey, GeoKeyValue::short(ANGULAR_UNIT_DEGREE));
        geo.set_key(GeoKeyId::GeogSemiMajorAxisGeoKey, GeoKeyValue::double(WGS84.a));
        geo.set_key(
            GeoKeyId::GeogInvFlatteningGeoKey,
            GeoKeyValue::double(WGS84.inverse_flattening()),
        );
        geo
    }

    /// 设置 GeoKey 值
    ///
    /// 如果键已存在,更新其值;否则添加新键。
    pub fn set_key<I: Into<u16>>(&mut self, id: I, value: GeoKeyValue) {
        let code: u16 = id.into();
        let key = GeoKey { code, value };
        let keys = &mut self.directory.keys;

        if let Some(index) = keys.iter().position(|key| key.code == code) {
            keys[index] = key;
        } else {
            keys.push(key);
        }
    }

    /// 获取 GeoKey 值
    pub fn get_key<I: Into<u16>>(&self, id: I) -> Option<&GeoKeyValue> {
        let code: u16 = id.into();
        self.directory
            .keys
            .iter()
            .find(|key| key.code == code)
            .map(|key| &key.value)
    }

    /// 将地理空间标签写入 TIFF 目录
    pub fn write_to<W: Write + Seek, K: TiffKind>(
        &self,
        dir: &mut DirectoryEncoder<W, K>,
    ) -> Result<(), TiffError> {
        dir.write_tag(
            Tag::Unknown(GeoTiffTag::ModelPixelScale.into()),
            &self.pixel_scale[..],
        )?;
        dir.write_tag(
            Tag::Unknown(GeoTiffTag::ModelTiepoint.into()),
            &self.tiepoint[..],
        )?;

        // 键目录按代码升序排列
        let mut directory = self.directory.clone();
        directory.keys.sort_by_key(|key| key.code);
        let encoded = directory.unparse();

        dir.write_tag(
            Tag::Unknown(GeoTiffTag::GeoKeyDirectory.into()),
            &encoded.directory[..],
        )?;
        if !encoded.double_params.is_empty() {
            dir.write_tag(
                Tag::Unknown(GeoTiffTag::GeoDoubleParams.into()),
                &encoded.double_params[..],
            )?;
        }
        if !encoded.ascii_params.is_empty() {
            dir.write_tag(
                Tag::Unknown(GeoTiffTag::GeoAsciiParams.into()),
                encoded.ascii_params.as_str(),
            )?;
        }
        Ok(())
    }
}
