//! Integration tests for image format detection and decoding.

use std::io::Cursor;

use gouache_common::image::LoadedImage;
use gouache_css::ImageHandle;
use gouache_render::{
    ImageDecoder, ImageFormat, ImageLoaderPipeline, PaintError, decode_image, detect_format,
};

fn png_bytes(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba(pixel));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

const RED_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
  <rect width="4" height="2" fill="#ff0000"/>
</svg>"##;

#[test]
fn test_detect_format_from_hint() {
    assert_eq!(detect_format(Some("logo.SVG"), b""), ImageFormat::Svg);
    assert_eq!(detect_format(Some("image/svg+xml"), b""), ImageFormat::Svg);
    assert_eq!(detect_format(Some("photo.png"), b""), ImageFormat::Raster);
    assert_eq!(detect_format(Some("image/png"), b""), ImageFormat::Raster);
}

#[test]
fn test_detect_format_from_bytes() {
    assert_eq!(detect_format(None, b"  \n<svg/>"), ImageFormat::Svg);
    assert_eq!(
        detect_format(None, b"<?xml version=\"1.0\"?><svg/>"),
        ImageFormat::Svg
    );
    assert_eq!(detect_format(None, b"\x89PNG\r\n"), ImageFormat::Raster);
    assert_eq!(detect_format(None, b""), ImageFormat::Raster);
}

#[test]
fn test_decode_png() {
    let bytes = png_bytes(3, 2, [10, 20, 30, 255]);
    let handle = decode_image(&bytes);
    let image = handle.image().unwrap();
    assert_eq!((image.width(), image.height()), (3, 2));
    assert_eq!(&image.rgba_data()[..4], &[10, 20, 30, 255]);
}

#[test]
fn test_decode_svg() {
    let image = ImageLoaderPipeline::new()
        .decode(RED_SVG.as_bytes(), Some("red.svg"))
        .unwrap();
    assert_eq!((image.width(), image.height()), (4, 2));
    assert_eq!(&image.rgba_data()[..4], &[255, 0, 0, 255]);
}

#[test]
fn test_garbage_becomes_failed_handle() {
    assert!(matches!(
        decode_image(b"definitely not an image"),
        ImageHandle::Failed(_)
    ));
    assert!(matches!(decode_image(b""), ImageHandle::Failed(_)));
    assert!(matches!(decode_image(b"<svg"), ImageHandle::Failed(_)));
}

#[test]
fn test_decode_error_variant() {
    let err = ImageLoaderPipeline::new()
        .decode(b"\x89PNG truncated", None)
        .unwrap_err();
    assert!(matches!(err, PaintError::ImageDecode(_)));
}

struct Checkerboard;

impl ImageDecoder for Checkerboard {
    fn name(&self) -> &'static str {
        "checkerboard"
    }

    fn supports(&self, format: ImageFormat) -> bool {
        format == ImageFormat::Raster
    }

    fn decode(&self, _bytes: &[u8]) -> Result<LoadedImage, PaintError> {
        Ok(LoadedImage::from_pixel(2, 2, [0, 0, 0, 255]))
    }
}

#[test]
fn test_custom_decoder_is_consulted_first() {
    let pipeline = ImageLoaderPipeline::new().with_decoder(Box::new(Checkerboard));
    let image = pipeline.decode(b"anything", None).unwrap();
    assert_eq!((image.width(), image.height()), (2, 2));

    // SVG still goes to the built-in decoder.
    let svg = pipeline.decode(RED_SVG.as_bytes(), None).unwrap();
    assert_eq!(svg.width(), 4);
}
