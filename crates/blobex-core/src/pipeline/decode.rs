//! In-memory image decoding with content-based format detection.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

use crate::error::DecodeError;

/// Result of decoding a byte buffer.
pub type DecodeResult = Result<DecodedImage, DecodeError>;

/// A successfully decoded image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Format the decoder recognised
    pub format: ImageFormat,
}

/// Decode `bytes` from scratch, guessing the format from the content.
///
/// The buffer is only borrowed; every call builds a fresh reader, so one
/// decode never affects the next.
pub fn decode_bytes(bytes: &[u8]) -> DecodeResult {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError {
            message: format!("Cannot detect image format: {}", e),
        })?;

    let format = reader.format().ok_or_else(|| DecodeError {
        message: "Unrecognized image format".to_string(),
    })?;

    let image = reader.decode()?;
    Ok(DecodedImage { image, format })
}
