//! Conversion options and configuration.
//!
//! This module provides the [`ConvertOptions`] struct for configuring the
//! pixel-art pipeline. Field names serialize in camelCase so the struct can
//! be flattened directly into request messages and settings files.

use serde::{Deserialize, Serialize};

use crate::palette::PalettePreset;

/// Largest accepted working-grid side.
pub const MAX_GRID: usize = 250;

/// Smallest accepted palette size.
pub const MIN_PALETTE_SIZE: usize = 2;

/// Largest accepted palette size.
pub const MAX_PALETTE_SIZE: usize = 24;

/// Largest accepted dither strength.
pub const MAX_DITHER_STRENGTH: f64 = 0.35;

/// Dither strength multiplier in polished-portrait mode.
const PORTRAIT_DITHER_SCALE: f64 = 0.7;

/// Configuration for one pixel-art conversion.
///
/// # Defaults
///
/// - Grid: 250 (working grid fits within 250 x 250)
/// - Palette: 12 colors extracted from the image, smoothed into a ramp
/// - Portrait mode: off
/// - Dither strength: 0.15
/// - Outlines: on, contrast threshold 0.22
///
/// # Example
///
/// ```
/// use pixel_art::{ConvertOptions, PalettePreset};
///
/// let options = ConvertOptions::new()
///     .grid_max(100)
///     .palette_preset(PalettePreset::Pico8)
///     .dither_strength(0.0);
///
/// assert_eq!(options.grid_max, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Maximum side of the working grid.
    ///
    /// Default: `250`
    pub grid_max: usize,

    /// Number of colors extracted in auto mode.
    ///
    /// Default: `12`
    pub palette_size: usize,

    /// Palette source.
    ///
    /// Default: [`PalettePreset::Auto`]
    pub palette_preset: PalettePreset,

    /// Merge, ramp and resample the palette, and run conservative index
    /// smoothing after quantization.
    ///
    /// Default: `true`
    pub palette_smoothing: bool,

    /// Portrait mode: prefilter, softer dithering, island cleanup and
    /// selective outlines.
    ///
    /// Default: `false`
    pub polished_portrait: bool,

    /// Ordered-dither strength, `0.0..=0.35`.
    ///
    /// Default: `0.15`
    pub dither_strength: f64,

    /// Draw outlines along high-contrast boundaries.
    ///
    /// Default: `true`
    pub edge_enabled: bool,

    /// Luminance contrast an outline boundary must reach, `0.0..=1.0`.
    ///
    /// Default: `0.22`
    pub edge_threshold: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            grid_max: MAX_GRID,
            palette_size: 12,
            palette_preset: PalettePreset::Auto,
            palette_smoothing: true,
            polished_portrait: false,
            dither_strength: 0.15,
            edge_enabled: true,
            edge_threshold: 0.22,
        }
    }
}

impl ConvertOptions {
    /// Create options with default values.
    ///
    /// This is equivalent to `ConvertOptions::default()` but more discoverable.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum working-grid side.
    #[inline]
    pub fn grid_max(mut self, grid_max: usize) -> Self {
        self.grid_max = grid_max;
        self
    }

    /// Set the auto-mode palette size.
    #[inline]
    pub fn palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }

    /// Set the palette source.
    #[inline]
    pub fn palette_preset(mut self, preset: PalettePreset) -> Self {
        self.palette_preset = preset;
        self
    }

    /// Enable or disable palette and index smoothing.
    #[inline]
    pub fn palette_smoothing(mut self, enabled: bool) -> Self {
        self.palette_smoothing = enabled;
        self
    }

    /// Enable or disable polished-portrait mode.
    #[inline]
    pub fn polished_portrait(mut self, enabled: bool) -> Self {
        self.polished_portrait = enabled;
        self
    }

    /// Set the ordered-dither strength.
    #[inline]
    pub fn dither_strength(mut self, strength: f64) -> Self {
        self.dither_strength = strength;
        self
    }

    /// Enable or disable outlines.
    #[inline]
    pub fn edge_enabled(mut self, enabled: bool) -> Self {
        self.edge_enabled = enabled;
        self
    }

    /// Set the outline contrast threshold.
    #[inline]
    pub fn edge_threshold(mut self, threshold: f64) -> Self {
        self.edge_threshold = threshold;
        self
    }

    /// Clamp every field into its supported range.
    ///
    /// Non-finite dither strength becomes 0; a non-finite edge threshold
    /// falls back to the default.
    ///
    /// ```
    /// use pixel_art::ConvertOptions;
    ///
    /// let options = ConvertOptions::new()
    ///     .palette_size(99)
    ///     .dither_strength(f64::NAN)
    ///     .sanitized();
    /// assert_eq!(options.palette_size, 24);
    /// assert_eq!(options.dither_strength, 0.0);
    /// ```
    pub fn sanitized(&self) -> Self {
        let dither_strength = if self.dither_strength.is_finite() {
            self.dither_strength.clamp(0.0, MAX_DITHER_STRENGTH)
        } else {
            0.0
        };
        let edge_threshold = if self.edge_threshold.is_finite() {
            self.edge_threshold.clamp(0.0, 1.0)
        } else {
            Self::default().edge_threshold
        };

        Self {
            grid_max: self.grid_max.clamp(1, MAX_GRID),
            palette_size: self.palette_size.clamp(MIN_PALETTE_SIZE, MAX_PALETTE_SIZE),
            dither_strength,
            edge_threshold,
            ..self.clone()
        }
    }

    /// Dither strength actually applied during quantization.
    #[inline]
    pub fn effective_dither_strength(&self) -> f64 {
        if self.polished_portrait {
            self.dither_strength * PORTRAIT_DITHER_SCALE
        } else {
            self.dither_strength
        }
    }
}
