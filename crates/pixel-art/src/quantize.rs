//! Ordered-dither quantization onto a palette.
//!
//! Each opaque pixel is nudged by a tiled 4x4 Bayer threshold, then mapped
//! to its nearest palette entry under CIEDE2000. The nudge is added equally
//! to all three channels, so it shifts lightness without adding hue noise.

use crate::color::{clamp255, Lab};
use crate::output::IndexedImage;
use crate::palette::Palette;
use crate::raster::RgbaImage;

/// 4x4 Bayer matrix, values 0..=15, indexed `[y & 3][x & 3]`.
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Channel offset added at `(x, y)` for a given dither strength.
///
/// The Bayer value is mapped to `-0.5..=0.5` and scaled by
/// `strength * 255`.
///
/// # Example
///
/// ```
/// use pixel_art::dither_nudge;
///
/// assert_eq!(dither_nudge(0, 0, 0.2), -0.5 * 0.2 * 255.0);
/// assert_eq!(dither_nudge(0, 3, 0.2), 0.5 * 0.2 * 255.0);
/// ```
#[inline]
pub fn dither_nudge(x: usize, y: usize, strength: f64) -> f64 {
    let v = BAYER_4X4[y & 3][x & 3] as f64 / 15.0;
    (v - 0.5) * strength * 255.0
}

/// Quantize `image` to `palette` with ordered dithering.
///
/// `strength` is the effective dither strength (already reduced for
/// portrait mode); zero disables the nudge. Transparent pixels get index 0.
/// Alpha is carried through unchanged.
pub fn quantize(image: &RgbaImage, palette: Palette, strength: f64) -> IndexedImage {
    let (width, height) = (image.width(), image.height());
    let mut indices = vec![0u8; image.pixel_count()];
    let mut alpha = vec![0u8; image.pixel_count()];

    for y in 0..height {
        for x in 0..width {
            let i = image.index(x, y);
            alpha[i] = image.alpha(i);
            if !image.is_opaque(i) {
                continue;
            }

            let n = if strength > 0.0 {
                dither_nudge(x, y, strength)
            } else {
                0.0
            };
            let channels = image.rgb(i).channels().map(|c| clamp255(c + n));
            let (idx, _) = palette.find_nearest(Lab::from_channels(channels));
            indices[i] = idx as u8;
        }
    }

    IndexedImage::new(indices, alpha, width, height, palette)
}
