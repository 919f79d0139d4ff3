//! Image validation and encoding for staged recipe photos.
//!
//! Images are sniffed from their bytes, not trusted by file extension.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{ImageFormat, ImageReader};

use crate::error::StageError;

/// Allowed image formats for recipe photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum file size for staged images (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Validate image data: check size and format, and detect content type.
///
/// Returns the content type on success (e.g., "image/jpeg").
pub fn validate_image(data: &[u8]) -> Result<String, StageError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(StageError::TooLarge {
            size: data.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| StageError::Unreadable(e.to_string()))?;

    let format = reader
        .format()
        .ok_or_else(|| StageError::Unreadable("could not detect image format".to_string()))?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(StageError::UnsupportedFormat(format!("{:?}", format)));
    }

    Ok(format.to_mime_type().to_string())
}

/// Encode bytes as a `data:` URL.
pub fn to_data_url(content_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(data))
}
