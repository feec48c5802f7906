//! Error type for the pixel-transform public API.

use thiserror::Error;

/// Rejections raised before any pixel is touched.
///
/// No stage returns a partial result: a failing call produces no buffer and
/// the caller decides whether to abort or keep the pre-stage image.
///
/// ```
/// use pixel_transform::{pixelate, PixelBuffer, PixelateMethod, TransformError};
///
/// let image = PixelBuffer::filled(4, 4, [0, 0, 0]).unwrap();
/// let err = pixelate(&image, 0, PixelateMethod::Average).unwrap_err();
/// assert_eq!(err, TransformError::InvalidBlockSize);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("block size must be at least 1")]
    InvalidBlockSize,

    #[error("palette size {requested} is invalid for an image of {pixels} pixels")]
    InvalidPaletteSize { requested: usize, pixels: usize },

    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

impl TransformError {
    /// True for rejections caused by stage parameters rather than the image.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            TransformError::InvalidBlockSize | TransformError::InvalidPaletteSize { .. }
        )
    }
}
