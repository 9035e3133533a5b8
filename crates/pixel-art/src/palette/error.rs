//! Error types for palette operations
//!
//! This module provides error types for color parsing, preset lookup and
//! palette validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// More entries than an 8-bit index grid can address
    #[error("palette has {len} colors (max {max})")]
    TooManyColors {
        /// Number of colors supplied
        len: usize,
        /// Largest supported palette
        max: usize,
    },
    /// Preset name not recognised
    #[error("unknown palette preset: {0}")]
    UnknownPreset(String),
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
