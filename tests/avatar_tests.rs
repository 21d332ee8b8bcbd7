use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use sewalogger::errors::AppError;
use sewalogger::utils::avatar::encode_avatar;
use std::io::Cursor;

fn encoded(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), format).unwrap();
    out
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 80, 40, 255]));
    encoded(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([10, 120, 200]));
    encoded(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

/// Decode the data URL back and return the stored dimensions.
fn stored_size(url: &str) -> (u32, u32) {
    let b64 = url
        .strip_prefix("data:image/jpeg;base64,")
        .expect("jpeg data url");
    let bytes = STANDARD.decode(b64).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    (img.width(), img.height())
}

#[test]
fn test_large_photo_is_scaled_to_long_edge() {
    let url = encode_avatar(&png(400, 300)).unwrap();
    assert_eq!(stored_size(&url), (200, 150));

    let url = encode_avatar(&jpeg(300, 900)).unwrap();
    let (w, h) = stored_size(&url);
    assert_eq!(h, 200);
    assert!(w <= 67 && w >= 66);
}

#[test]
fn test_small_image_keeps_its_size() {
    let url = encode_avatar(&png(120, 80)).unwrap();
    assert_eq!(stored_size(&url), (120, 80));

    let url = encode_avatar(&jpeg(50, 50)).unwrap();
    assert_eq!(stored_size(&url), (50, 50));
}

#[test]
fn test_undecodable_file_is_rejected() {
    let err = encode_avatar(b"GIF89a....").unwrap_err();
    assert!(matches!(err, AppError::InvalidAvatar(_)));

    let err = encode_avatar(b"just some text").unwrap_err();
    assert!(matches!(err, AppError::InvalidAvatar(_)));
}
