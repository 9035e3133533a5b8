//! PixelArtConverter builder -- the primary ergonomic entry point for the crate.
//!
//! [`PixelArtConverter`] wraps the conversion pipeline with fluent
//! configuration and runs every stage in its fixed order.

use tracing::debug;

use super::error::ConvertError;
use super::options::ConvertOptions;
use crate::cleanup::{
    apply_outlines, apply_selective_outlines, cleanup_tiny_islands, conservative_smooth,
    edge_aware_prefilter,
};
use crate::output::IndexedImage;
use crate::palette::{build_palette, PalettePreset};
use crate::quantize::quantize;
use crate::raster::RgbaImage;
use crate::resample::{downscale_bilinear, fit_within, upscale_nearest};

/// High-level pixel-art converter.
///
/// # Design
///
/// - Configuration methods consume and return `self` (standard builder pattern)
/// - Options are sanitized on every run, so out-of-range values are clamped
///   rather than rejected
/// - [`convert()`](Self::convert) takes `&self` so the converter is
///   **reusable** across images
///
/// # Pipeline
///
/// 1. Downscale onto a working grid that fits within `grid_max`
/// 2. Edge-aware prefilter (portrait mode)
/// 3. Build the palette (median cut or preset, optionally smoothed)
/// 4. Quantize with ordered dithering
/// 5. Conservative smoothing (palette smoothing)
/// 6. Tiny-island cleanup (portrait mode)
/// 7. Outlines, selective in portrait mode (edges enabled)
/// 8. Render and upscale with nearest-neighbor sampling
///
/// # Example
///
/// ```
/// use pixel_art::{PalettePreset, PixelArtConverter, RgbaImage};
///
/// let src = RgbaImage::new(2, 2, [[200, 40, 40, 255]; 4].concat()).unwrap();
/// let converter = PixelArtConverter::new()
///     .palette_preset(PalettePreset::Pico8)
///     .dither_strength(0.0);
///
/// let out = converter.convert(&src, 8, 8).unwrap();
/// assert_eq!((out.width(), out.height()), (8, 8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PixelArtConverter {
    options: ConvertOptions,
}

impl PixelArtConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter from a complete set of options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The options as configured (before sanitizing).
    #[inline]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Set the maximum working-grid side.
    #[inline]
    pub fn grid_max(mut self, grid_max: usize) -> Self {
        self.options = self.options.grid_max(grid_max);
        self
    }

    /// Set the auto-mode palette size.
    #[inline]
    pub fn palette_size(mut self, size: usize) -> Self {
        self.options = self.options.palette_size(size);
        self
    }

    /// Set the palette source.
    #[inline]
    pub fn palette_preset(mut self, preset: PalettePreset) -> Self {
        self.options = self.options.palette_preset(preset);
        self
    }

    /// Enable or disable palette and index smoothing.
    #[inline]
    pub fn palette_smoothing(mut self, enabled: bool) -> Self {
        self.options = self.options.palette_smoothing(enabled);
        self
    }

    /// Enable or disable polished-portrait mode.
    #[inline]
    pub fn polished_portrait(mut self, enabled: bool) -> Self {
        self.options = self.options.polished_portrait(enabled);
        self
    }

    /// Set the ordered-dither strength.
    #[inline]
    pub fn dither_strength(mut self, strength: f64) -> Self {
        self.options = self.options.dither_strength(strength);
        self
    }

    /// Enable or disable outlines.
    #[inline]
    pub fn edge_enabled(mut self, enabled: bool) -> Self {
        self.options = self.options.edge_enabled(enabled);
        self
    }

    /// Set the outline contrast threshold.
    #[inline]
    pub fn edge_threshold(mut self, threshold: f64) -> Self {
        self.options = self.options.edge_threshold(threshold);
        self
    }

    /// Run every stage up to and including outlines, returning the indexed
    /// working grid.
    pub fn quantize_grid(&self, src: &RgbaImage) -> Result<IndexedImage, ConvertError> {
        let opts = self.options.sanitized();

        let (w, h) = fit_within(src.width(), src.height(), opts.grid_max);
        let small = downscale_bilinear(src, w, h)?;
        debug!(
            src_width = src.width(),
            src_height = src.height(),
            grid_width = w,
            grid_height = h,
            "Downscaled to working grid"
        );

        let prepared = if opts.polished_portrait {
            debug!("Applying edge-aware prefilter");
            edge_aware_prefilter(&small)
        } else {
            small
        };

        let palette = build_palette(
            &prepared,
            opts.palette_preset,
            opts.palette_size,
            opts.palette_smoothing,
        )?;
        debug!(
            preset = %opts.palette_preset,
            colors = palette.len(),
            smoothing = opts.palette_smoothing,
            "Built palette"
        );

        let strength = opts.effective_dither_strength();
        let mut grid = quantize(&prepared, palette, strength);
        debug!(strength, "Quantized working grid");

        if opts.palette_smoothing {
            grid = conservative_smooth(&grid, opts.edge_threshold);
            debug!("Applied conservative smoothing");
        }

        if opts.polished_portrait {
            grid = cleanup_tiny_islands(&grid);
            debug!("Cleaned up tiny islands");
        }

        if opts.edge_enabled {
            grid = if opts.polished_portrait {
                apply_selective_outlines(&grid, opts.edge_threshold)
            } else {
                apply_outlines(&grid, opts.edge_threshold)
            };
            debug!(
                threshold = opts.edge_threshold,
                selective = opts.polished_portrait,
                "Applied outlines"
            );
        }

        Ok(grid)
    }

    /// Convert `src` into a `out_width` x `out_height` pixel-art raster.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidDimensions`] if an output side is zero
    /// - [`ConvertError::OutputTooLarge`] if the output cannot be allocated
    pub fn convert(
        &self,
        src: &RgbaImage,
        out_width: usize,
        out_height: usize,
    ) -> Result<RgbaImage, ConvertError> {
        crate::raster::buffer_len(out_width, out_height)?;

        let grid = self.quantize_grid(src)?;
        let out = upscale_nearest(&grid.to_rgba(), out_width, out_height)?;
        debug!(out_width, out_height, "Upscaled output");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: 4x4 grey gradient, dark to light.
    fn gradient_4x4() -> RgbaImage {
        let data: Vec<u8> = (0..16)
            .flat_map(|i| {
                let v = (i as f64 / 15.0 * 255.0) as u8;
                [v, v, v, 255]
            })
            .collect();
        RgbaImage::new(4, 4, data).unwrap()
    }

    #[test]
    fn test_builder_chaining() {
        let converter = PixelArtConverter::new()
            .grid_max(100)
            .palette_size(6)
            .palette_preset(PalettePreset::Nes)
            .palette_smoothing(false)
            .polished_portrait(true)
            .dither_strength(0.1)
            .edge_enabled(false)
            .edge_threshold(0.4);

        let expected = ConvertOptions {
            grid_max: 100,
            palette_size: 6,
            palette_preset: PalettePreset::Nes,
            palette_smoothing: false,
            polished_portrait: true,
            dither_strength: 0.1,
            edge_enabled: false,
            edge_threshold: 0.4,
        };
        assert_eq!(converter.options(), &expected);
    }

    #[test]
    fn test_convert_output_size() {
        let converter = PixelArtConverter::new();
        let out = converter.convert(&gradient_4x4(), 12, 7).unwrap();
        assert_eq!(out.width(), 12);
        assert_eq!(out.height(), 7);
        assert_eq!(out.data().len(), 12 * 7 * 4);
    }

    #[test]
    fn test_convert_rejects_zero_output() {
        let converter = PixelArtConverter::new();
        assert!(matches!(
            converter.convert(&gradient_4x4(), 0, 4),
            Err(ConvertError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_grid_respects_grid_max() {
        let converter = PixelArtConverter::new().grid_max(2);
        let grid = converter.quantize_grid(&gradient_4x4()).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
    }

    #[test]
    fn test_indices_within_palette() {
        for portrait in [false, true] {
            let converter = PixelArtConverter::new()
                .palette_size(5)
                .polished_portrait(portrait);
            let grid = converter.quantize_grid(&gradient_4x4()).unwrap();
            assert!(grid
                .indices()
                .iter()
                .all(|&i| (i as usize) < grid.palette().len()));
        }
    }

    #[test]
    fn test_convert_reusable() {
        let converter = PixelArtConverter::new().polished_portrait(true);
        let first = converter.convert(&gradient_4x4(), 8, 8).unwrap();
        let second = converter.convert(&gradient_4x4(), 8, 8).unwrap();
        assert_eq!(first, second);
    }
}
