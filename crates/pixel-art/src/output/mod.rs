//! Output types for the conversion pipeline.
//!
//! This module provides [`IndexedImage`], the working-grid result that the
//! quantizer produces and every cleanup pass rewrites.
//!
//! # Output Formats
//!
//! [`IndexedImage`] stores palette indices and per-pixel alpha with an owned
//! [`Palette`](crate::palette::Palette), offering two output formats:
//!
//! - **Indexed** ([`IndexedImage::indices`]): Raw `u8` palette indices
//! - **RGBA** ([`IndexedImage::to_rgba`]): Rendered grid, transparent pixels
//!   kept transparent

mod indexed_image;

pub use indexed_image::IndexedImage;
