//! pixel-art: Grid-quantized pixel art with perceptual palettes
//!
//! This library turns an RGBA raster into pixel art: it shrinks the image
//! onto a coarse working grid, reduces it to a small palette matched by
//! CIEDE2000 distance, cleans up the resulting index grid, and blows it back
//! up into crisp blocks.
//!
//! # Quick Start
//!
//! The [`PixelArtConverter`] builder is the primary entry point:
//!
//! ```
//! use pixel_art::{PixelArtConverter, RgbaImage};
//!
//! let pixels = [[255, 0, 0, 255], [0, 0, 255, 255]].repeat(8).concat();
//! let src = RgbaImage::new(4, 4, pixels).unwrap();
//!
//! let converter = PixelArtConverter::new()
//!     .grid_max(100)
//!     .palette_size(4)
//!     .dither_strength(0.0);
//! let out = converter.convert(&src, 16, 16).unwrap();
//!
//! assert_eq!(out.width(), 16);
//! ```
//!
//! # Message API
//!
//! For worker-style integration, [`process_request`] consumes a
//! [`ProcessRequest`] (which owns the source buffer) and returns a
//! [`ProcessResponse`] owning the output buffer. Both serialize as the
//! tagged [`Message`] enum.
//!
//! # Pipeline
//!
//! ```text
//! RGBA source
//!     |
//!     v
//! downscale_bilinear         (fit within grid_max x grid_max)
//!     |
//!     +---> edge_aware_prefilter      (portrait)
//!     |
//!     v
//! build_palette              (median cut or preset, optional ramp smoothing)
//!     |
//!     v
//! quantize                   (Bayer 4x4 nudge, nearest by CIEDE2000)
//!     |
//!     +---> conservative_smooth       (palette smoothing)
//!     +---> cleanup_tiny_islands      (portrait)
//!     +---> apply_outlines / apply_selective_outlines  (edges)
//!     |
//!     v
//! IndexedImage::to_rgba -> upscale_nearest
//! ```
//!
//! Every stage is a pure function of its inputs. Index passes read one grid
//! and write a fresh one.
//!
//! # Color Science
//!
//! Two measures of color are used, for different purposes:
//!
//! - **CIEDE2000** ([`Lab::delta_e_2000`]) for every "are these colors the
//!   same?" decision: nearest-palette matching, merging near-duplicate
//!   palette entries, and the similarity guards on cleanup passes.
//! - **Luminance** ([`Rgb::luminance`], Rec. 709 weights on the encoded
//!   values) for every "which is darker?" decision: ramp ordering, the
//!   outline color, and edge contrast.
//!
//! Transparency is binary for processing purposes: pixels with alpha below
//! 10 are skipped by palette extraction and quantization and render as
//! transparent black, but their original alpha is always carried through.

pub mod api;
pub mod cleanup;
pub mod color;
pub mod message;
pub mod output;
pub mod palette;
pub mod quantize;
pub mod raster;
pub mod resample;


pub use api::{ConvertError, ConvertOptions, PixelArtConverter};
pub use cleanup::{
    apply_outlines, apply_selective_outlines, cleanup_tiny_islands, conservative_smooth,
    edge_aware_prefilter,
};
pub use color::{srgb_to_linear, to_linear, Lab, Rgb};
pub use message::{process_request, Message, ProcessRequest, ProcessResponse};
pub use output::IndexedImage;
pub use palette::{
    build_palette, enforce_light_to_dark_ramp, median_cut, merge_near_duplicates, sample_ramp,
    Palette, PaletteError, PalettePreset, ParseColorError,
};
pub use quantize::{dither_nudge, quantize, BAYER_4X4};
pub use raster::{RgbaImage, OPAQUE_ALPHA_MIN};
pub use resample::{downscale_bilinear, fit_within, upscale_nearest};
