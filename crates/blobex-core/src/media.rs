//! Media kind detection from magic bytes.
//!
//! `MediaKind` is the one place where a format's signature and its file
//! extension are tied together; everything else asks the enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image container recognised by its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Jpeg,
    Png,
    Gif,
    WebP,
    Bmp,
    /// No known signature matched
    Unknown,
}

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const GIF87_MAGIC: &[u8] = b"GIF87a";
const GIF89_MAGIC: &[u8] = b"GIF89a";
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_TAG: &[u8] = b"WEBP";
const BMP_MAGIC: &[u8] = b"BM";

impl MediaKind {
    /// Classify raw bytes. Total: short or empty input is `Unknown`.
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(JPEG_MAGIC) {
            return Self::Jpeg;
        }
        if data.starts_with(PNG_MAGIC) {
            return Self::Png;
        }
        if data.starts_with(GIF87_MAGIC) || data.starts_with(GIF89_MAGIC) {
            return Self::Gif;
        }
        if data.starts_with(RIFF_MAGIC) && Self::has_webp_tag(data) {
            return Self::WebP;
        }
        if data.starts_with(BMP_MAGIC) {
            return Self::Bmp;
        }
        Self::Unknown
    }

    /// `WEBP` anywhere in bytes 8..16 (the RIFF form type sits at 8).
    fn has_webp_tag(data: &[u8]) -> bool {
        let end = data.len().min(16);
        data.get(8..end)
            .map(|window| window.windows(WEBP_TAG.len()).any(|w| w == WEBP_TAG))
            .unwrap_or(false)
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
            Self::Unknown => "bin",
        }
    }

    pub fn is_jpeg(self) -> bool {
        self == Self::Jpeg
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
