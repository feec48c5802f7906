//! Gamma lookup table access functions
//!
//! Tables are generated at compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

const LAST: usize = SRGB_TO_LINEAR.len() - 1;

#[inline]
fn lookup(table: &[f32], value: f32) -> f32 {
    // Out-of-gamut values (e.g. cluster centers decoded from Oklab) saturate.
    let scaled = value.clamp(0.0, 1.0) * LAST as f32;
    let index = scaled as usize;
    if index >= LAST {
        return table[LAST];
    }

    let frac = scaled - index as f32;
    let a = table[index];
    let b = table[index + 1];
    a + (b - a) * frac
}

/// Convert an sRGB value (0.0..=1.0) to linear light.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    lookup(&SRGB_TO_LINEAR, srgb)
}

/// Convert a linear light value (0.0..=1.0) to sRGB.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    lookup(&LINEAR_TO_SRGB, linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert!(srgb_to_linear(0.0).abs() < 1e-6);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(linear_to_srgb(0.0).abs() < 1e-6);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(linear_to_srgb(-0.25), linear_to_srgb(0.0));
        assert_eq!(linear_to_srgb(1.5), linear_to_srgb(1.0));
    }

    #[test]
    fn test_every_byte_survives_round_trip() {
        for v in 0..=255u8 {
            let s = v as f32 / 255.0;
            let back = (linear_to_srgb(srgb_to_linear(s)) * 255.0).round() as u8;
            assert_eq!(back, v, "byte {v} drifted through the gamma tables");
        }
    }
}
