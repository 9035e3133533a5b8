//! Color types and conversion utilities
//!
//! This module provides the two color representations the pipeline works
//! with, and the perceptual distance used for every palette decision.
//!
//! # Color Spaces
//!
//! - [`Rgb`]: 8-bit sRGB. Palette entries, raster pixels, luminance math.
//! - [`Lab`]: CIE L\*a\*b\* (D65). Perceptual matching via
//!   [`Lab::delta_e_2000`].
//!
//! # Example
//!
//! ```
//! use pixel_art::{Lab, Rgb};
//!
//! let skin = Rgb::new(231, 175, 145);
//! let lab = Lab::from(skin);
//!
//! // Identical colors have zero perceptual distance
//! assert_eq!(lab.delta_e_2000(lab), 0.0);
//! ```

mod lab;
mod lut;
mod rgb;

pub use lab::Lab;
pub use lut::{srgb_to_linear, to_linear};
pub use rgb::Rgb;

pub(crate) use rgb::{clamp255, round_half_up, store_channel};
