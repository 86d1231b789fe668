//! GeoTIFF 保存流程
//!
//! 把内存中的 BGR / BGRA 栅格连同原点大地坐标和每像素米数写为 GeoTIFF:
//!
//! 1. 校验图像尺寸和通道布局
//! 2. 将每像素米数换算为每像素度数
//! 3. 生成通道顺序为 RGB / RGBA 的临时副本
//! 4. 交给编码器写出
//!
//! 校验失败时不会调用编码器,也不会分配副本。输出文件不保证原子性,
//! 编码失败时可能留下不完整的文件。

use crate::encode::{GeoTiffEncoder, RasterEncoder};
use crate::error::{SaveError, SaveResult};
use crate::geodetic::{GeodeticCoordinate, GeodeticTransform, Wgs84};
use crate::raster::{adapt_channel_order, Raster};
use crate::resolution::{convert_with, MetersPerPixel};
use std::path::Path;
use tracing::*;

/// 使用默认的 [`GeoTiffEncoder`] 保存栅格
///
/// # 示例
///
/// ```no_run
/// use geotiff_save::geodetic::GeodeticCoordinate;
/// use geotiff_save::raster::{ChannelLayout, Raster};
/// use geotiff_save::resolution::MetersPerPixel;
///
/// let image = Raster::blank((640, 480), ChannelLayout::Rgb)?;
/// geotiff_save::save(
///     "scene.tif",
///     &image,
///     GeodeticCoordinate::from_degrees(-123.1, 49.25, 70.0),
///     MetersPerPixel::new(0.5, 0.5),
/// )?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn save<P: AsRef<Path>>(
    path: P,
    image: &Raster,
    origin: GeodeticCoordinate,
    meters: MetersPerPixel,
) -> SaveResult<()> {
    save_with(&GeoTiffEncoder::default(), path, image, origin, meters)
}

/// 使用指定的编码器保存栅格
///
/// 原点为左上角像素左上角的大地坐标(弧度),`meters` 为每像素米数。
///
/// # 错误
///
/// - 宽度或高度为零,或图像没有数据 - [`SaveError::InvalidDimensions`]
/// - 通道数不是 1、3、4 - [`SaveError::UnsupportedChannelLayout`]
/// - 坐标变换失败 - [`SaveError::Transform`]
/// - 通道转换副本分配失败 - [`SaveError::Allocation`]
/// - 编码器失败 - [`SaveError::Encode`]
pub fn save_with<E: RasterEncoder + ?Sized, P: AsRef<Path>>(
    encoder: &E,
    path: P,
    image: &Raster,
    origin: GeodeticCoordinate,
    meters: MetersPerPixel,
) -> SaveResult<()> {
    Saver::new(encoder).save(path, image, origin, meters)
}

/// 绑定编码器和大地坐标变换的保存器
///
/// 适合用同一组参数重复保存多幅图像。
#[derive(Debug, Clone, Default)]
pub struct Saver<E, T = Wgs84> {
    encoder: E,
    transform: T,
}

impl<E: RasterEncoder> Saver<E> {
    /// 使用 WGS84 变换创建保存器
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            transform: Wgs84::default(),
        }
    }
}

impl<E, T> Saver<E, T> {
    /// 替换大地坐标变换
    pub fn with_transform<U: GeodeticTransform>(self, transform: U) -> Saver<E, U> {
        Saver {
            encoder: self.encoder,
            transform,
        }
    }

    /// 当前编码器
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// 当前大地坐标变换
    pub fn transform(&self) -> &T {
        &self.transform
    }
}

impl<E: RasterEncoder, T: GeodeticTransform> Saver<E, T> {
    /// 保存栅格,参见 [`save_with`]
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        image: &Raster,
        origin: GeodeticCoordinate,
        meters: MetersPerPixel,
    ) -> SaveResult<()> {
        let path = path.as_ref();
        let (width, height) = image.dimensions;

        if width == 0 || height == 0 || image.is_empty() {
            return Err(SaveError::InvalidDimensions { width, height });
        }
        image.layout()?;

        let conversion = convert_with(&self.transform, origin, meters, width, height)?;
        debug!(
            "保存 {image} 到 {}: 原点 {origin}, 分辨率 {:?}",
            path.display(),
            conversion.resolution
        );

        let adapted = adapt_channel_order(image)?;
        self.encoder
            .encode(path, &adapted, &origin, &conversion.resolution)
            .map_err(|e| {
                warn!("写入 {} 失败: {e}", path.display());
                SaveError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{EncodeError, EncodeResult};
    use crate::geodetic::{GeodeticResult, Ned};
    use crate::raster::ChannelLayout;
    use crate::resolution::DegreesPerPixel;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Call {
        path: PathBuf,
        raster: Raster,
        origin: GeodeticCoordinate,
        resolution: DegreesPerPixel,
    }

    #[derive(Default)]
    struct RecordingEncoder {
        calls: Mutex<Vec<Call>>,
    }

    impl RasterEncoder for RecordingEncoder {
        fn encode(
            &self,
            path: &Path,
            raster: &Raster,
            origin: &GeodeticCoordinate,
            resolution: &DegreesPerPixel,
        ) -> EncodeResult<()> {
            self.calls.lock().unwrap().push(Call {
                path: path.to_path_buf(),
                raster: raster.clone(),
                origin: *origin,
                resolution: *resolution,
            });
            Ok(())
        }
    }

    struct FailingEncoder;

    impl RasterEncoder for FailingEncoder {
        fn encode(
            &self,
            _: &Path,
            _: &Raster,
            _: &GeodeticCoordinate,
            _: &DegreesPerPixel,
        ) -> EncodeResult<()> {
            Err(EncodeError::Native {
                status: -1,
                message: "cannot open file".into(),
            })
        }
    }

    /// 1 米对应 1 弧度的简化变换
    struct Flat;

    impl GeodeticTransform for Flat {
        fn ned_to_geodetic(
            &self,
            ned: Ned,
            origin: GeodeticCoordinate,
        ) -> GeodeticResult<GeodeticCoordinate> {
            Ok(GeodeticCoordinate::new(
                origin.longitude + ned.east,
                origin.latitude + ned.north,
                origin.altitude - ned.down,
            ))
        }
    }

    fn bgra_pixel() -> Raster {
        Raster::new((1, 1), 4, vec![10, 20, 30, 40]).unwrap()
    }

    #[test]
    fn test_encoder_receives_swapped_copy() {
        let encoder = RecordingEncoder::default();
        let image = bgra_pixel();
        let origin = GeodeticCoordinate::from_degrees(10.0, 20.0, 5.0);

        save_with(&encoder, "a.tif", &image, origin, MetersPerPixel::new(1.0, 1.0)).unwrap();

        let calls = encoder.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, PathBuf::from("a.tif"));
        assert_eq!(calls[0].raster.as_bytes(), &[30, 20, 10, 40]);
        assert_eq!(calls[0].origin, origin);
        assert_eq!(image.as_bytes(), &[10, 20, 30, 40]);
    }

    #[test]
    fn test_gray_passed_unchanged() {
        let encoder = RecordingEncoder::default();
        let image = Raster::new((2, 1), 1, vec![7, 9]).unwrap();

        save_with(
            &encoder,
            "gray.tif",
            &image,
            GeodeticCoordinate::default(),
            MetersPerPixel::new(1.0, 1.0),
        )
        .unwrap();

        assert_eq!(encoder.calls.lock().unwrap()[0].raster, image);
    }

    #[test]
    fn test_resolution_from_transform() {
        let saver = Saver::new(RecordingEncoder::default()).with_transform(Flat);
        let image = Raster::blank((4, 2), ChannelLayout::Rgb).unwrap();

        saver
            .save(
                "flat.tif",
                &image,
                GeodeticCoordinate::default(),
                MetersPerPixel::new(0.5, -0.25),
            )
            .unwrap();

        // 北向 0.5 * 2 = 1 弧度,东向 -0.25 * 4 = -1 弧度
        let calls = saver.encoder().calls.lock().unwrap();
        let resolution = calls[0].resolution;
        assert!((resolution.latitude - 1.0_f64.to_degrees() / 2.0).abs() < 1e-12);
        assert!((resolution.longitude + 1.0_f64.to_degrees() / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_dimensions_skip_encoder() {
        let encoder = RecordingEncoder::default();
        let image = Raster::new((0, 5), 3, vec![]).unwrap();

        let result = save_with(
            &encoder,
            "empty.tif",
            &image,
            GeodeticCoordinate::default(),
            MetersPerPixel::new(1.0, 1.0),
        );

        assert!(matches!(
            result,
            Err(SaveError::InvalidDimensions {
                width: 0,
                height: 5
            })
        ));
        assert!(encoder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_layout_skip_encoder() {
        let encoder = RecordingEncoder::default();
        for channels in [2, 5] {
            let image = Raster::new((1, 1), channels, vec![0; channels]).unwrap();
            let result = save_with(
                &encoder,
                "bad.tif",
                &image,
                GeodeticCoordinate::default(),
                MetersPerPixel::new(1.0, 1.0),
            );
            assert!(
                matches!(result, Err(SaveError::UnsupportedChannelLayout(n)) if n == channels)
            );
        }
        assert!(encoder.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_encoder_failure_propagated() {
        let image = bgra_pixel();
        let result = save_with(
            &FailingEncoder,
            "fail.tif",
            &image,
            GeodeticCoordinate::default(),
            MetersPerPixel::new(1.0, 1.0),
        );

        match result {
            Err(SaveError::Encode(EncodeError::Native { status, message })) => {
                assert_eq!(status, -1);
                assert_eq!(message, "cannot open file");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(image.as_bytes(), &[10, 20, 30, 40]);
    }

    #[test]
    fn test_boxed_encoder() {
        let encoder: Box<dyn RasterEncoder> = Box::new(FailingEncoder);
        let result = save_with(
            &encoder,
            "boxed.tif",
            &bgra_pixel(),
            GeodeticCoordinate::default(),
            MetersPerPixel::new(1.0, 1.0),
        );
        assert!(matches!(result, Err(SaveError::Encode(_))));
    }
}
