//! Color types and conversion utilities
//!
//! Pixels are stored as 8-bit sRGB. Clustering happens in [`Oklab`], which
//! is reached through [`LinearRgb`] because the Oklab matrices expect
//! linear light.
//!
//! # Example
//!
//! ```
//! use pixel_transform::{Oklab, Srgb, LinearRgb};
//!
//! let srgb = Srgb::from_u8(128, 64, 32);
//! let lab = Oklab::from(LinearRgb::from(srgb));
//! assert_eq!(lab.to_bytes(), [128, 64, 32]);
//! ```

mod linear_rgb;
mod lut;
mod oklab;
mod srgb;

pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use srgb::Srgb;
