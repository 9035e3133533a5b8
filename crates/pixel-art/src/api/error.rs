//! Unified error type for the pixel-art public API.
//!
//! [`ConvertError`] covers everything a conversion request can be rejected
//! for, wrapping palette errors for convenient `?` propagation.

use thiserror::Error;

use crate::palette::PaletteError;

/// Unified error type for the pixel-art public API.
///
/// # Example
///
/// ```
/// use pixel_art::{ConvertError, RgbaImage};
///
/// let err = RgbaImage::new(2, 2, vec![0; 3]).unwrap_err();
/// assert!(matches!(err, ConvertError::BufferSizeMismatch { expected: 16, actual: 3 }));
/// ```
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A raster dimension was zero
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// RGBA buffer length does not equal width * height * 4
    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// Bytes required by the dimensions
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// Requested output raster cannot be addressed in memory
    #[error("output too large: {width}x{height}")]
    OutputTooLarge {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// Palette validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
}
