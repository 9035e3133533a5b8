//! Gamma lookup table access functions
//!
//! This module provides sRGB decoding for 8-bit channels using a table
//! generated at compile time by build.rs, plus the exact formula for the
//! fractional channels produced by dithering.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB channel to linear light (0.0..=1.0).
///
/// Bit-identical to [`srgb_to_linear`] for integral inputs.
#[inline]
pub fn to_linear(channel: u8) -> f64 {
    SRGB8_TO_LINEAR[channel as usize]
}

/// Decode a fractional sRGB channel on the 0..=255 scale to linear light.
///
/// Linear segment below 0.04045 (slope 1/12.92), power 2.4 above.
#[inline]
pub fn srgb_to_linear(channel: f64) -> f64 {
    let x = channel / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_linear_boundaries() {
        assert_eq!(to_linear(0), 0.0);
        assert!((to_linear(255) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lut_matches_formula() {
        for i in 0..=255u8 {
            assert_eq!(
                to_linear(i),
                srgb_to_linear(i as f64),
                "LUT entry {i} differs from the exact formula"
            );
        }
    }

    #[test]
    fn test_linear_segment() {
        // 10/255 = 0.0392 is below the 0.04045 knee
        let expected = (10.0 / 255.0) / 12.92;
        assert!((to_linear(10) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_monotonicity() {
        let mut prev = to_linear(0);
        for i in 1..=255u8 {
            let curr = to_linear(i);
            assert!(curr > prev, "to_linear not monotonic at {i}");
            prev = curr;
        }
    }
}
