//! The pixel grid shared by every transform stage.

use std::collections::HashSet;

use crate::api::TransformError;

/// A dense, row-major grid of 8-bit RGB pixels.
///
/// Every stage takes a `&PixelBuffer` and returns a new one; inputs are
/// never modified in place. Width and height are both at least 1 and the
/// pixel vector always holds exactly `width * height` entries.
///
/// ```
/// use pixel_transform::PixelBuffer;
///
/// let image = PixelBuffer::new(2, 1, vec![[255, 0, 0], [0, 0, 255]]).unwrap();
/// assert_eq!(image.get(1, 0), [0, 0, 255]);
/// assert_eq!(image.distinct_colors(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// Wrap decoded pixels, validating dimensions against the pixel count.
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Result<Self, TransformError> {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(TransformError::InvalidDimensions { width, height })?;
        if pixels.len() != expected {
            return Err(TransformError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer where every pixel has the same color.
    pub fn filled(width: usize, height: usize, color: [u8; 3]) -> Result<Self, TransformError> {
        let count = width
            .checked_mul(height)
            .ok_or(TransformError::InvalidDimensions { width, height })?;
        Self::new(width, height, vec![color; count])
    }

    /// Build a buffer from a flat `[R, G, B, R, G, B, ...]` byte slice.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, TransformError> {
        if bytes.len() % 3 != 0 {
            return Err(TransformError::PixelCountMismatch {
                expected: width.saturating_mul(height),
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Self::new(width, height, pixels)
    }

    /// Internal constructor for stage outputs whose shape is already known
    /// to match.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false for a constructed buffer; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Overwrite the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: [u8; 3]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x] = color;
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 3]]> {
        self.pixels.chunks_exact(self.width)
    }

    /// Number of distinct colors in the image.
    pub fn distinct_colors(&self) -> usize {
        self.pixels.iter().collect::<HashSet<_>>().len()
    }

    /// Flatten to `[R, G, B, R, G, B, ...]`.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            PixelBuffer::new(0, 4, vec![]),
            Err(TransformError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(PixelBuffer::filled(3, 0, [0, 0, 0]).is_err());
    }

    #[test]
    fn test_rejects_wrong_pixel_count() {
        let err = PixelBuffer::new(2, 2, vec![[0, 0, 0]; 3]).unwrap_err();
        assert_eq!(
            err,
            TransformError::PixelCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_rgb_bytes_round_trip() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let image = PixelBuffer::from_rgb_bytes(2, 2, &bytes).unwrap();
        assert_eq!(image.get(1, 1), [10, 11, 12]);
        assert_eq!(image.to_rgb_bytes(), bytes);
    }

    #[test]
    fn test_ragged_byte_slice_rejected() {
        assert!(PixelBuffer::from_rgb_bytes(1, 1, &[1, 2]).is_err());
    }

    #[test]
    fn test_rows_have_equal_width() {
        let image = PixelBuffer::filled(5, 3, [9, 9, 9]).unwrap();
        let rows: Vec<_> = image.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 5));
    }

    #[test]
    fn test_set_and_distinct_colors() {
        let mut image = PixelBuffer::filled(2, 2, [0, 0, 0]).unwrap();
        assert_eq!(image.distinct_colors(), 1);
        image.set(1, 0, [255, 255, 255]);
        assert_eq!(image.distinct_colors(), 2);
        assert_eq!(image.get(1, 0), [255, 255, 255]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let image = PixelBuffer::filled(2, 2, [0, 0, 0]).unwrap();
        let _ = image.get(2, 0);
    }
}
