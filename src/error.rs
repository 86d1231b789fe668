//! 保存流程的错误处理模块
//!
//! 保存流程中各个步骤的错误统一汇总为 [`SaveError`]:
//!
//! - 尺寸校验和分辨率换算 - [`ResolutionError`] / [`GeodeticError`]
//! - 通道布局校验和通道转换 - [`RasterError`]
//! - 文件编码 - [`EncodeError`]

use crate::encode::EncodeError;
use crate::geodetic::GeodeticError;
use crate::raster::RasterError;
use crate::resolution::ResolutionError;
use std::collections::TryReserveError;
use thiserror::Error;

/// 保存操作的通用结果类型
pub type SaveResult<T> = Result<T, SaveError>;

/// 保存 GeoTIFF 时可能出现的错误
#[derive(Debug, Error)]
pub enum SaveError {
    /// 图像宽度或高度为零,或者图像没有数据
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// 通道数不是 1、3、4
    #[error("unsupported channel layout with {0} channels")]
    UnsupportedChannelLayout(usize),

    /// 求右下角坐标时坐标变换失败
    #[error(transparent)]
    Transform(GeodeticError),

    /// 通道转换副本分配失败
    #[error("failed to allocate channel-swapped copy: {0}")]
    Allocation(TryReserveError),

    /// 编码器报告的失败
    #[error("failed to encode GeoTIFF: {0}")]
    Encode(#[from] EncodeError),
}

/// 从分辨率换算错误转换
impl From<ResolutionError> for SaveError {
    fn from(e: ResolutionError) -> Self {
        match e {
            ResolutionError::InvalidDimensions { width, height } => {
                SaveError::InvalidDimensions { width, height }
            }
            ResolutionError::Transform(e) => SaveError::Transform(e),
        }
    }
}

/// 从栅格错误转换
///
/// 缓冲区大小和零通道错误只会在构造栅格时出现,这里按最接近的类别归类。
impl From<RasterError> for SaveError {
    fn from(e: RasterError) -> Self {
        match e {
            RasterError::UnsupportedChannelLayout(n) => SaveError::UnsupportedChannelLayout(n),
            RasterError::ZeroChannels => SaveError::UnsupportedChannelLayout(0),
            RasterError::BufferSize(_, (width, height), _) => {
                SaveError::InvalidDimensions { width, height }
            }
            RasterError::Allocation(e) => SaveError::Allocation(e),
        }
    }
}
