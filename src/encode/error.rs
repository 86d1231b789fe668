//! GeoTIFF 编码过程中的错误处理模块
//!
//! # 错误类型
//!
//! - IO 写入错误 - 文件创建和写入失败
//! - TIFF 编码错误 - tiff 库报告的失败
//! - 栅格错误 - 通道布局无法写为灰度、RGB 或 RGBA
//! - 地理参考错误 - 原点或分辨率不是有限数
//! - 外部编码器错误 - 带状态码和消息的失败,或没有任何细节的通用失败
//!
//! # 示例
//!
//! ```
//! use geotiff_save::encode::EncodeError;
//!
//! let error = EncodeError::Native { status: -2, message: "disk full".into() };
//! assert_eq!(error.to_string(), "encoder failed with status -2: disk full");
//! ```

use crate::raster::RasterError;
use std::io;
use thiserror::Error;

/// 编码操作的通用结果类型
pub type EncodeResult<T> = Result<T, EncodeError>;

/// 编码过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum EncodeError {
    /// 文件写入错误
    #[error("write error: {0}")]
    Io(#[from] io::Error),

    /// tiff 库编码错误
    #[error("tiff encoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// 栅格无法按灰度、RGB 或 RGBA 写出
    #[error("unsupported raster: {0}")]
    Raster(#[from] RasterError),

    /// 原点或分辨率无法写入地理参考标签
    #[error("invalid georeference: {0}")]
    InvalidGeoreference(String),

    /// 外部编码器报告的失败,包含状态码和消息
    #[error("encoder failed with status {status}: {message}")]
    Native { status: i32, message: String },

    /// 外部编码器失败但没有提供任何细节
    #[error("encoder failed")]
    Failed,
}
