//! Corruption detection for raw image bytes.

use crate::error::DecodeError;
use crate::media::MediaKind;

use super::decode::decode_bytes;

/// The complete PNG end chunk: zero length, `IEND`, then its CRC.
const PNG_IEND: [u8; 12] = [
    0x00, 0x00, 0x00, 0x00, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82,
];

/// JPEG end-of-image marker.
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// GIF trailer byte.
const GIF_TRAILER: u8 = 0x3B;

/// Decides whether a BLOB holds a usable image.
///
/// Verification is a full decode followed by an end-of-stream check for the
/// detected format. Some decoders fill in missing scanlines rather than
/// fail, so a stream cut short must also end the way its format requires.
/// Only decoder errors and missing stream ends count as corruption.
pub struct IntegrityChecker;

impl IntegrityChecker {
    /// Verify the bytes decode cleanly and the stream is complete.
    pub fn verify(data: &[u8]) -> Result<(), DecodeError> {
        decode_bytes(data)?;
        check_stream_end(data, MediaKind::detect(data))
    }

    /// `true` when the bytes cannot be decoded as an image.
    pub fn is_corrupt(data: &[u8]) -> bool {
        match Self::verify(data) {
            Ok(()) => false,
            Err(e) => {
                tracing::debug!("Integrity check failed: {}", e);
                true
            }
        }
    }
}

/// Check that `data` carries the terminator (or declared length) of `kind`.
fn check_stream_end(data: &[u8], kind: MediaKind) -> Result<(), DecodeError> {
    let complete = match kind {
        MediaKind::Jpeg => {
            // Trailing zero padding after EOI is common and harmless
            let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            data[..end].ends_with(&JPEG_EOI)
        }
        MediaKind::Png => data.windows(PNG_IEND.len()).any(|w| w == PNG_IEND),
        MediaKind::Gif => data.last() == Some(&GIF_TRAILER),
        MediaKind::WebP => {
            declared_len(data, 4).is_some_and(|riff| riff.saturating_add(8) <= data.len())
        }
        MediaKind::Bmp => declared_len(data, 2).is_some_and(|size| size <= data.len()),
        MediaKind::Unknown => true,
    };

    if complete {
        Ok(())
    } else {
        Err(DecodeError {
            message: format!("truncated {} stream", kind),
        })
    }
}

/// Little-endian u32 length field at `offset`.
fn declared_len(data: &[u8], offset: usize) -> Option<usize> {
    let field = data.get(offset..offset + 4)?;
    let bytes: [u8; 4] = field.try_into().ok()?;
    usize::try_from(u32::from_le_bytes(bytes)).ok()
}
