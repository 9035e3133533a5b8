//! Outline synthesis along high-contrast index boundaries.

use crate::output::IndexedImage;

/// Floor for the selective-outline contrast threshold.
const SELECTIVE_MIN_THRESHOLD: f64 = 0.3;

/// How much stricter the selective pass is than the configured threshold.
const SELECTIVE_THRESHOLD_BOOST: f64 = 0.08;

/// Paint the darkest palette entry onto interior pixels that sit on a
/// boundary with at least `threshold` luminance contrast.
///
/// A pixel qualifies when any 4-neighbor has a different index and the
/// largest luminance difference to its 4-neighbors reaches `threshold`.
///
/// # Example
///
/// ```
/// use pixel_art::{apply_outlines, IndexedImage, Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(250, 250, 250), Rgb::new(10, 10, 10)]).unwrap();
/// let grid = IndexedImage::new(vec![0, 0, 0, 0, 0, 1, 0, 0, 0], vec![255; 9], 3, 3, palette);
///
/// // The center borders the dark pixel to its east
/// assert_eq!(apply_outlines(&grid, 0.22).indices()[4], 1);
/// ```
pub fn apply_outlines(grid: &IndexedImage, threshold: f64) -> IndexedImage {
    outline_pass(grid, threshold, 1)
}

/// Stricter outline pass used in portrait mode.
///
/// Requires at least two differing 4-neighbors and a contrast of at least
/// `max(0.3, threshold + 0.08)`, so soft shading gradients stay clean.
pub fn apply_selective_outlines(grid: &IndexedImage, threshold: f64) -> IndexedImage {
    let stricter = (threshold + SELECTIVE_THRESHOLD_BOOST).max(SELECTIVE_MIN_THRESHOLD);
    outline_pass(grid, stricter, 2)
}

fn outline_pass(grid: &IndexedImage, threshold: f64, min_differing: usize) -> IndexedImage {
    let (w, h) = (grid.width(), grid.height());
    let palette = grid.palette();
    let idx = grid.indices();
    let outline = palette.darkest_index() as u8;
    let mut out = idx.to_vec();

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let i = y * w + x;
            let here = idx[i];
            let neighbors = [idx[i - w], idx[i + w], idx[i - 1], idx[i + 1]];

            let differing = neighbors.iter().filter(|&&n| n != here).count();
            if differing < min_differing {
                continue;
            }

            let lum = palette.luminance(here as usize);
            let max_contrast = neighbors
                .iter()
                .map(|&n| (lum - palette.luminance(n as usize)).abs())
                .fold(0.0, f64::max);
            if max_contrast >= threshold {
                out[i] = outline;
            }
        }
    }

    grid.with_indices(out)
}
