//! sRGB color type
//!
//! sRGB is the storage encoding of [`PixelBuffer`](crate::PixelBuffer)
//! pixels. It is gamma-encoded, so arithmetic on it is only meaningful after
//! conversion to [`LinearRgb`].

use super::linear_rgb::LinearRgb;
use super::lut::linear_to_srgb;

/// A color in sRGB color space, channels in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-corrected, 0.0..=1.0)
    pub r: f32,
    /// Green channel (gamma-corrected, 0.0..=1.0)
    pub g: f32,
    /// Blue channel (gamma-corrected, 0.0..=1.0)
    pub b: f32,
}

impl Srgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit channel values.
    ///
    /// ```
    /// use pixel_transform::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create an Srgb color from a pixel `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a pixel `[R, G, B]`, rounding and clamping to 0..=255.
    ///
    /// ```
    /// use pixel_transform::Srgb;
    /// let color = Srgb::new(1.2, 0.5, -0.1);
    /// assert_eq!(color.to_bytes(), [255, 128, 0]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }
}

impl From<LinearRgb> for Srgb {
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r),
            g: linear_to_srgb(linear.g),
            b: linear_to_srgb(linear.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_matches_from_u8() {
        assert_eq!(Srgb::from_bytes([10, 20, 30]), Srgb::from_u8(10, 20, 30));
    }

    #[test]
    fn test_to_bytes_round_trip() {
        for v in [0u8, 1, 17, 128, 254, 255] {
            assert_eq!(Srgb::from_u8(v, v, v).to_bytes(), [v, v, v]);
        }
    }

    #[test]
    fn test_linear_round_trip() {
        let original = Srgb::from_u8(200, 100, 50);
        let back = Srgb::from(LinearRgb::from(original));
        assert_eq!(back.to_bytes(), [200, 100, 50]);
    }
}
