//! Test images and files.

use pixel_art::RgbaImage;
use std::path::{Path, PathBuf};

/// A `width x height` image filled with one RGBA color.
pub fn solid(width: usize, height: usize, rgba: [u8; 4]) -> RgbaImage {
    let data = rgba.repeat(width * height);
    RgbaImage::new(width, height, data).unwrap()
}

/// A 2x2 image of red, green, blue and yellow.
pub fn quadrants() -> RgbaImage {
    RgbaImage::new(
        2,
        2,
        vec![
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 0, 255,
        ],
    )
    .unwrap()
}

/// A horizontal gradient from black to white.
pub fn gradient(width: usize, height: usize) -> RgbaImage {
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            let v = (x * 255 / (width - 1).max(1)) as u8;
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    RgbaImage::new(width, height, data).unwrap()
}

/// Write `image` as a PNG under `dir`.
pub fn write_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    pixelizer::services::write_png(&path, image, false).unwrap();
    path
}
