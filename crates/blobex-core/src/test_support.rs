//! Fixture builders shared by unit tests.

use image::codecs::gif::GifEncoder;
use image::{DynamicImage, Frame, ImageFormat, RgbImage, RgbaImage};
use rusqlite::{params, Connection};
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn pattern_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7) as u8, (y * 13) as u8, ((x ^ y) * 3) as u8])
    })
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(pattern_rgb(width, height)), ImageFormat::Png)
}

pub fn rgba_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let rgba = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 11) as u8, (y * 5) as u8, 40, (x + y) as u8])
    });
    encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(pattern_rgb(width, height)), ImageFormat::Jpeg)
}

pub fn webp_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(pattern_rgb(width, height)), ImageFormat::WebP)
}

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(pattern_rgb(width, height)), ImageFormat::Bmp)
}

pub fn gif_bytes(width: u32, height: u32) -> Vec<u8> {
    let rgba = DynamicImage::ImageRgb8(pattern_rgb(width, height)).to_rgba8();
    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder.encode_frame(Frame::new(rgba)).unwrap();
    }
    buffer
}

/// Create `images.db` in `dir` with the default table layout and `rows`
/// of (key, image, timestamp).
pub fn create_image_db(dir: &Path, rows: &[(&str, Option<Vec<u8>>, i64)]) -> PathBuf {
    let path = dir.join("images.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "CREATE TABLE images (key TEXT, image BLOB, timestamp INTEGER)",
        [],
    )
    .unwrap();
    for (key, image, timestamp) in rows {
        conn.execute(
            "INSERT INTO images (key, image, timestamp) VALUES (?1, ?2, ?3)",
            params![key, image, timestamp],
        )
        .unwrap();
    }
    path
}
