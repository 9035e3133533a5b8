//! Public API for the pixel-art crate.
//!
//! This module provides the high-level API: the [`PixelArtConverter`]
//! builder, its [`ConvertOptions`], and the [`ConvertError`] unified error
//! type.

mod builder;
mod error;
mod options;

pub use builder::PixelArtConverter;
pub use error::ConvertError;
pub use options::{
    ConvertOptions, MAX_DITHER_STRENGTH, MAX_GRID, MAX_PALETTE_SIZE, MIN_PALETTE_SIZE,
};
