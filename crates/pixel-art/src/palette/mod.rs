//! Palette types and construction
//!
//! This module provides the [`Palette`] used for matching, the built-in
//! [`PalettePreset`] tables, median-cut extraction and the smoothing passes
//! that turn a raw color set into a luminance ramp.

mod error;
mod generate;
mod median_cut;
#[allow(clippy::module_inception)]
mod palette;
mod presets;
mod smoothing;

pub use error::{PaletteError, ParseColorError};
pub use generate::build_palette;
pub use median_cut::median_cut;
pub use palette::Palette;
pub use presets::PalettePreset;
pub use smoothing::{enforce_light_to_dark_ramp, merge_near_duplicates, sample_ramp, MERGE_THRESHOLD};
