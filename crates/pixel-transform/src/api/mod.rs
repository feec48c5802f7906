//! Public API for the pixel-transform crate.
//!
//! This module provides the high-level API: [`PixelArtist`] builder and
//! [`TransformError`] unified error type.

mod builder;
mod error;

pub use builder::PixelArtist;
pub use error::TransformError;
