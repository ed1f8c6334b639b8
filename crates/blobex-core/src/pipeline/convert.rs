//! Re-encoding to JPEG.

use image::codecs::jpeg::JpegEncoder;

use crate::error::ConversionError;

use super::decode::decode_bytes;

/// JPEG quality used for every conversion (0-100).
pub const JPEG_QUALITY: u8 = 95;

/// Converts decodable images into a canonical JPEG byte stream.
pub struct JpegConverter;

impl JpegConverter {
    /// Decode `data`, flatten to RGB8 and encode as JPEG at [`JPEG_QUALITY`].
    ///
    /// Alpha is dropped and palettes expanded by the decoder's default
    /// conversion. Encoder settings other than quality stay at their defaults.
    pub fn convert(data: &[u8]) -> Result<Vec<u8>, ConversionError> {
        let decoded = decode_bytes(data)?;
        let rgb = decoded.image.to_rgb8();

        let mut buffer = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY))
            .map_err(|e| ConversionError::Encode {
                message: e.to_string(),
            })?;

        Ok(buffer)
    }
}
