//! 参考椭球体参数
//!
//! 只保存写入 GeoKey 所需的定义参数,坐标计算由 proj4rs 完成。

/// 参考椭球体
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// 长半轴(米)
    pub a: f64,
    /// 扁率
    pub f: f64,
}

impl Ellipsoid {
    /// 由长半轴和扁率构造椭球体
    pub const fn new(a: f64, f: f64) -> Self {
        Self { a, f }
    }

    /// 扁率倒数
    pub fn inverse_flattening(&self) -> f64 {
        1.0 / self.f
    }

    /// 第一偏心率平方: 2f - f^2
    pub fn eccentricity_squared(&self) -> f64 {
        2.0 * self.f - self.f * self.f
    }
}

/// WGS84 椭球体
pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);
