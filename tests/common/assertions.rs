//! Assertion helpers for tests.

use pixel_art::RgbaImage;
use std::collections::HashSet;

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Distinct RGB values among pixels with any opacity
pub fn visible_colors(image: &RgbaImage) -> HashSet<[u8; 3]> {
    image
        .data()
        .chunks_exact(4)
        .filter(|p| p[3] > 0)
        .map(|p| [p[0], p[1], p[2]])
        .collect()
}

/// Assert every `block x block` cell of `image` is a single color
pub fn assert_blocky(image: &RgbaImage, block: usize) {
    let data = image.data();
    for y in 0..image.height() {
        for x in 0..image.width() {
            let anchor = image.index(x - x % block, y - y % block) * 4;
            let i = image.index(x, y) * 4;
            assert_eq!(
                &data[i..i + 4],
                &data[anchor..anchor + 4],
                "pixel ({x}, {y}) differs from its block anchor"
            );
        }
    }
}
