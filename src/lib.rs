//! Pixelart - turn photos into pixel art
//!
//! Decodes images, runs the pixel-transform stages (pixelate, reduce
//! colors, dither) and encodes the result.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
