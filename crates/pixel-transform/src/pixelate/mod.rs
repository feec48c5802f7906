//! Block pixelation.
//!
//! The image is shrunk so that every `block_size` x `block_size` region
//! collapses to a single sample, then grown back to its original size.
//! The method decides how the sample is formed and how it is spread back
//! out:
//!
//! | Method | Before shrink | Shrink | Grow |
//! |--------|---------------|--------|------|
//! | [`PixelateMethod::Average`] | - | area average | nearest neighbor (hard edges) |
//! | [`PixelateMethod::Gaussian`] | Gaussian blur, kernel `block_size + 1` | area average | bicubic (soft edges) |
//!
//! ```
//! use pixel_transform::{pixelate, PixelBuffer, PixelateMethod};
//!
//! let image = PixelBuffer::filled(16, 16, [90, 90, 90]).unwrap();
//! let out = pixelate(&image, 4, PixelateMethod::Average).unwrap();
//! assert_eq!(out, image);
//! ```

mod blur;
pub mod resample;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::api::TransformError;
use crate::buffer::PixelBuffer;

pub use blur::{auto_sigma, gaussian_blur, gaussian_kernel};

/// How block colors are computed and spread back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelateMethod {
    /// Area-average each block and upscale with nearest neighbor.
    #[default]
    Average,
    /// Blur first, area-average, then upscale with a bicubic filter.
    Gaussian,
}

impl PixelateMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PixelateMethod::Average => "average",
            PixelateMethod::Gaussian => "gaussian",
        }
    }
}

impl fmt::Display for PixelateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is not one of `average` / `gaussian`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported pixelation method: {0:?}")]
pub struct ParseMethodError(pub String);

impl FromStr for PixelateMethod {
    type Err = ParseMethodError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("average") {
            Ok(PixelateMethod::Average)
        } else if name.eq_ignore_ascii_case("gaussian") {
            Ok(PixelateMethod::Gaussian)
        } else {
            Err(ParseMethodError(s.to_string()))
        }
    }
}

/// Reduced grid size for a given block size: `max(1, dim / block_size)`.
///
/// ```
/// use pixel_transform::reduced_dimensions;
/// assert_eq!(reduced_dimensions(640, 480, 8), (80, 60));
/// assert_eq!(reduced_dimensions(10, 10, 100), (1, 1));
/// ```
pub fn reduced_dimensions(width: usize, height: usize, block_size: u32) -> (usize, usize) {
    let block = (block_size as usize).max(1);
    ((width / block).max(1), (height / block).max(1))
}

/// Blur kernel size for the Gaussian method: `block_size + 1`, bumped to
/// the next odd value when even.
pub fn blur_kernel_size(block_size: u32) -> usize {
    (block_size as usize).saturating_add(1) | 1
}

/// Pixelate `image` into `block_size` blocks.
///
/// The output always has the input's dimensions. A zero block size is
/// rejected before any resampling happens.
pub fn pixelate(
    image: &PixelBuffer,
    block_size: u32,
    method: PixelateMethod,
) -> Result<PixelBuffer, TransformError> {
    if block_size == 0 {
        return Err(TransformError::InvalidBlockSize);
    }

    let (width, height) = (image.width(), image.height());
    let (small_w, small_h) = reduced_dimensions(width, height, block_size);

    let out = match method {
        PixelateMethod::Average => {
            let small = resample::area(image, small_w, small_h);
            resample::nearest(&small, width, height)
        }
        PixelateMethod::Gaussian => {
            let ksize = blur_kernel_size(block_size);
            let blurred = gaussian_blur(image, ksize);
            let small = resample::area(&blurred, small_w, small_h);
            resample::cubic(&small, width, height)
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise(width: usize, height: usize) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| {
                let v = (i * 7919 % 251) as u8;
                [v, v.wrapping_mul(3), 255 - v]
            })
            .collect();
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("average".parse(), Ok(PixelateMethod::Average));
        assert_eq!(" Gaussian ".parse(), Ok(PixelateMethod::Gaussian));
        let err = "mosaic".parse::<PixelateMethod>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported pixelation method: \"mosaic\"");
    }

    #[test]
    fn test_method_display_round_trips() {
        for m in [PixelateMethod::Average, PixelateMethod::Gaussian] {
            assert_eq!(m.to_string().parse(), Ok(m));
        }
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let image = noise(4, 4);
        for m in [PixelateMethod::Average, PixelateMethod::Gaussian] {
            assert_eq!(pixelate(&image, 0, m), Err(TransformError::InvalidBlockSize));
        }
    }

    #[test]
    fn test_dimensions_preserved() {
        for (w, h, b) in [(17, 9, 4), (1, 1, 3), (30, 2, 7), (8, 8, 1)] {
            let image = noise(w, h);
            for m in [PixelateMethod::Average, PixelateMethod::Gaussian] {
                let out = pixelate(&image, b, m).unwrap();
                assert_eq!((out.width(), out.height()), (w, h), "{w}x{h} b={b} {m}");
            }
        }
    }

    #[test]
    fn test_average_blocks_are_uniform() {
        let image = noise(12, 8);
        let out = pixelate(&image, 4, PixelateMethod::Average).unwrap();
        for by in 0..2 {
            for bx in 0..3 {
                let first = out.get(bx * 4, by * 4);
                for y in by * 4..by * 4 + 4 {
                    for x in bx * 4..bx * 4 + 4 {
                        assert_eq!(out.get(x, y), first);
                    }
                }
            }
        }
    }

    #[test]
    fn test_average_block_is_mean_of_block() {
        let image = PixelBuffer::new(
            2,
            2,
            vec![[0, 10, 20], [40, 50, 60], [80, 90, 100], [120, 130, 140]],
        )
        .unwrap();
        let out = pixelate(&image, 2, PixelateMethod::Average).unwrap();
        assert!(out.pixels().iter().all(|&p| p == [60, 70, 80]));
    }

    #[test]
    fn test_block_size_one_average_is_identity() {
        let image = noise(7, 5);
        assert_eq!(pixelate(&image, 1, PixelateMethod::Average).unwrap(), image);
    }

    #[test]
    fn test_kernel_size_is_odd() {
        assert_eq!(blur_kernel_size(8), 9);
        assert_eq!(blur_kernel_size(3), 5);
        assert_eq!(blur_kernel_size(1), 3);
        for b in 1..40 {
            assert_eq!(blur_kernel_size(b) % 2, 1);
        }
    }

    #[test]
    fn test_oversized_gaussian_block_keeps_nominal_kernel() {
        // Block far larger than the image: the whole image becomes the mean
        // of a blur at the full block_size + 1 kernel, not a shortened one.
        let image = noise(6, 3);
        let out = pixelate(&image, 50, PixelateMethod::Gaussian).unwrap();

        let blurred = gaussian_blur(&image, 51);
        let mean = resample::area(&blurred, 1, 1).get(0, 0);
        assert!(out.pixels().iter().all(|&p| p == mean), "{:?} vs {mean:?}", out.get(0, 0));
    }

    #[test]
    fn test_gaussian_is_smoother_than_average() {
        let mut image = PixelBuffer::filled(16, 16, [0, 0, 0]).unwrap();
        for y in 0..16 {
            for x in 8..16 {
                image.set(x, y, [255, 255, 255]);
            }
        }
        let hard = pixelate(&image, 4, PixelateMethod::Average).unwrap();
        let soft = pixelate(&image, 4, PixelateMethod::Gaussian).unwrap();
        let levels = |img: &PixelBuffer| img.rows().next().unwrap().iter().collect::<std::collections::HashSet<_>>().len();
        assert_eq!(levels(&hard), 2);
        assert!(levels(&soft) > 2, "gaussian should blend across the edge");
    }
}
