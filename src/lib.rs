//! Pixelizer
//!
//! Command-line front end for the `pixel-art` converter: PNG decoding and
//! encoding, YAML option profiles and a background conversion worker.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
