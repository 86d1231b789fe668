// 如果没有启用 "image" 特性,编译时会报错
#[cfg(not(feature = "image"))]
compile_error!("This example requires the 'image' feature");

use geotiff_save::{GeoTiffEncoder, GeodeticCoordinate, MetersPerPixel, Raster, Saver};
use geotiff_save::SupportedCompression;
use image::{DynamicImage, RgbImage};

const OUTPUT_FILE: &str = "data/save.tif";

fn main() {
    println!("Example: geotiff-save");

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // 生成一张渐变图像
    let img = RgbImage::from_fn(512, 256, |x, y| image::Rgb([(x / 2) as u8, y as u8, 128]));
    let raster = Raster::from_image(&DynamicImage::ImageRgb8(img)).unwrap();

    let saver = Saver::new(GeoTiffEncoder::new().with_compression(SupportedCompression::Deflate));
    let origin = GeodeticCoordinate::from_degrees(-123.1207, 49.2827, 70.0); // 左上角
    let meters = MetersPerPixel::new(0.5, 0.5); // 每像素 0.5 米

    std::fs::create_dir_all("data").unwrap();
    saver.save(OUTPUT_FILE, &raster, origin, meters).unwrap();
    println!("GeoTIFF saved to {OUTPUT_FILE}");
}
