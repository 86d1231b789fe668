//! GeoTIFF 键值数据类型模块
//!
//! # 示例
//!
//! ```
//! use geotiff_save::geotags::GeoKeyValue;
//!
//! let short_value = GeoKeyValue::Short(vec![1, 2, 3]);
//! let ascii_value = GeoKeyValue::Ascii("WGS 84".to_string());
//! assert_eq!(ascii_value.to_string(), "WGS 84");
//! ```

use std::fmt::Display;

/// GeoTIFF 键值数据类型
///
/// * `Short` - 16位无符号整数数组
/// * `Ascii` - ASCII字符串
/// * `Double` - 64位浮点数数组
#[derive(Clone, Debug, PartialEq)]
pub enum GeoKeyValue {
    /// 16位无符号整数数组
    Short(Vec<u16>),

    /// ASCII字符串
    Ascii(String),

    /// 64位浮点数数组
    Double(Vec<f64>),
}

impl GeoKeyValue {
    /// 单个短整型值
    pub fn short<V: Into<u16>>(value: V) -> Self {
        GeoKeyValue::Short(vec![value.into()])
    }

    /// 单个双精度值
    pub fn double(value: f64) -> Self {
        GeoKeyValue::Double(vec![value])
    }

    /// 尝试将值转换为字符串引用
    pub fn as_string(&self) -> Option<&String> {
        match self {
            GeoKeyValue::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

/// 根据不同的值类型采用不同的格式:
/// * ASCII - 显示字符串内容,换行符显示为"\n"
/// * 单个数值 - 直接显示数值
/// * 数值数组 - 使用调试格式显示
impl Display for GeoKeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoKeyValue::Ascii(s) => write!(f, "{}", s.replace("\n", "\\n")),

            // 单个数值直接显示
            GeoKeyValue::Double(v) if v.len() == 1 => write!(f, "{}", v[0]),
            GeoKeyValue::Short(v) if v.len() == 1 => write!(f, "{}", v[0]),

            GeoKeyValue::Double(v) => write!(f, "{v:?}"),
            GeoKeyValue::Short(v) => write!(f, "{v:?}"),
        }
    }
}
