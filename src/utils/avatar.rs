//! Avatar images: thumbnail and `data:` URL encoding.

use crate::errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Longest stored edge, in pixels.
pub const MAX_AVATAR_EDGE: u32 = 200;

/// Decode any supported image, scale it down to `MAX_AVATAR_EDGE` on its
/// long edge and encode it as a JPEG `data:` URL.
/// Smaller images keep their size.
pub fn encode_avatar(bytes: &[u8]) -> AppResult<String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| AppError::InvalidAvatar(format!("cannot decode image: {e}")))?;

    let img = if img.width().max(img.height()) > MAX_AVATAR_EDGE {
        img.thumbnail(MAX_AVATAR_EDGE, MAX_AVATAR_EDGE)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut out = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
        .map_err(|e| AppError::InvalidAvatar(format!("cannot encode thumbnail: {e}")))?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&out)))
}

pub fn load_avatar(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path)?;
    encode_avatar(&bytes)
}
