#![allow(clippy::excessive_precision, clippy::needless_range_loop)]

//! pixel-transform: pixel-art style transforms for RGB images
//!
//! Three independent stages turn an ordinary image into pixel art:
//!
//! - **Pixelate**: collapse `block_size` x `block_size` regions into single
//!   colors and grow them back ([`pixelate`]).
//! - **Quantize**: reduce the palette to `k` colors with k-means clustering
//!   in Oklab ([`quantize`], [`Quantizer`]).
//! - **Dither**: Floyd-Steinberg error diffusion onto eight levels per
//!   channel ([`dither`]).
//!
//! Every stage takes a [`PixelBuffer`] by reference and returns a new one;
//! inputs are never modified. Stages can be chained by hand or through the
//! [`PixelArtist`] builder, which applies them in the order above.
//!
//! # Quick Start
//!
//! ```
//! use pixel_transform::{PixelArtist, PixelBuffer, PixelateMethod};
//!
//! let image = PixelBuffer::filled(32, 32, [200, 120, 40]).unwrap();
//! let out = PixelArtist::new()
//!     .pixelate(8, PixelateMethod::Gaussian)
//!     .colors(8)
//!     .dither(true)
//!     .render(&image)
//!     .unwrap();
//! assert_eq!((out.width(), out.height()), (32, 32));
//! ```
//!
//! # Stage by Stage
//!
//! ```
//! use pixel_transform::{dither, pixelate, quantize, PixelBuffer, PixelateMethod};
//!
//! let pixels = (0..64u8).map(|v| [v * 4, v * 2, 255 - v * 4]).collect();
//! let image = PixelBuffer::new(8, 8, pixels).unwrap();
//!
//! let blocky = pixelate(&image, 2, PixelateMethod::Average).unwrap();
//! let reduced = quantize(&blocky, 3).unwrap();
//! let dithered = dither(&reduced);
//! assert_eq!(dithered.len(), 64);
//! ```
//!
//! # Color Spaces
//!
//! - [`Srgb`]: gamma-encoded values as stored in image files
//! - [`LinearRgb`]: linear light, the bridge between the other two
//! - [`Oklab`]: perceptually uniform; k-means distances and centers live here
//!
//! Pixelation and dithering work directly on the stored 8-bit values.
//! Only the quantizer converts, because cluster means in sRGB drift towards
//! muddy midtones while Oklab means stay close to what the eye averages.
//!
//! # Failure Modes
//!
//! Invalid parameters ([`TransformError`]) are reported before any pixel is
//! processed. There are no partial results.
//!
//! Randomness only enters through k-means initialization. Set
//! [`QuantizeOptions::seed`] for reproducible palettes.

pub mod api;
pub mod buffer;
pub mod color;
pub mod dither;
pub mod output;
pub mod pixelate;
pub mod quantize;


pub use api::{PixelArtist, TransformError};
pub use buffer::PixelBuffer;
pub use color::{LinearRgb, Oklab, Srgb};
pub use dither::{dither, dither_with_options, DitherOptions, Kernel, FLOYD_STEINBERG};
pub use output::{QuantizedImage, RenderReport};
pub use pixelate::{pixelate, reduced_dimensions, ParseMethodError, PixelateMethod};
pub use quantize::{quantize, QuantizeOptions, Quantizer};
