//! Palette construction for one conversion.

use super::error::PaletteError;
use super::median_cut::median_cut;
use super::palette::Palette;
use super::presets::PalettePreset;
use super::smoothing::{enforce_light_to_dark_ramp, merge_near_duplicates, sample_ramp, MERGE_THRESHOLD};
use crate::raster::RgbaImage;

/// Build the palette for `image`.
///
/// [`PalettePreset::Auto`] extracts `palette_size` colors with
/// [`median_cut`]; any other preset uses its fixed table and ignores
/// `palette_size`. With `smoothing`, the colors are merged, ramped and
/// resampled: back to `palette_size` entries in auto mode, or to the merged
/// count for presets.
///
/// # Example
///
/// ```
/// use pixel_art::{build_palette, PalettePreset, RgbaImage};
///
/// let image = RgbaImage::new(1, 1, vec![10, 20, 30, 255]).unwrap();
/// let palette = build_palette(&image, PalettePreset::Gameboy, 12, false).unwrap();
/// assert_eq!(palette.len(), 4);
/// ```
pub fn build_palette(
    image: &RgbaImage,
    preset: PalettePreset,
    palette_size: usize,
    smoothing: bool,
) -> Result<Palette, PaletteError> {
    let base = match preset.colors() {
        Some(colors) => colors.to_vec(),
        None => median_cut(image, palette_size),
    };

    if !smoothing {
        return Palette::new(&base);
    }

    let merged = merge_near_duplicates(&base, MERGE_THRESHOLD);
    let ramp = enforce_light_to_dark_ramp(&merged);
    let count = match preset {
        PalettePreset::Auto => palette_size,
        _ => merged.len(),
    };
    Palette::new(&sample_ramp(&ramp, count))
}
