//! CIE L\*a\*b\* color space and the CIEDE2000 color difference
//!
//! Conversion goes sRGB -> linear -> XYZ (sRGB primaries) -> Lab relative to
//! the D65 reference white. Distances use the full CIEDE2000 formula with
//! unit weighting factors (kL = kC = kH = 1).
//!
//! # References
//!
//! Sharma, Wu, Dalal, "The CIEDE2000 Color-Difference Formula:
//! Implementation Notes, Supplementary Test Data, and Mathematical
//! Observations" (2005).

use std::f64::consts::PI;

use super::lut::{srgb_to_linear, to_linear};
use super::rgb::Rgb;

/// D65 reference white
const REF_X: f64 = 0.95047;
const REF_Y: f64 = 1.0;
const REF_Z: f64 = 1.08883;

/// CIE constants for the Lab companding function.
const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA_SLOPE: f64 = 7.787;

/// 25^7, the chroma pivot shared by the G and R_C terms.
const POW25_7: f64 = 6_103_515_625.0;

/// A color in CIE L\*a\*b\* (D65).
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis
/// - `b`: Blue-yellow axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert fractional sRGB channels (0.0..=255.0) to Lab.
    ///
    /// Dithered pixels are matched before they are rounded back to bytes, so
    /// the quantizer goes through this entry point rather than [`From<Rgb>`].
    pub fn from_channels(channels: [f64; 3]) -> Self {
        let [r, g, b] = channels;
        Self::from_linear(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    fn from_linear(r: f64, g: f64, b: f64) -> Self {
        let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
        let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
        let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

        let fx = lab_f(x / REF_X);
        let fy = lab_f(y / REF_Y);
        let fz = lab_f(z / REF_Z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// CIEDE2000 perceptual difference between two colors.
    ///
    /// Symmetric, and exactly zero for identical inputs.
    ///
    /// # Example
    ///
    /// ```
    /// use pixel_art::{Lab, Rgb};
    ///
    /// let red = Lab::from(Rgb::new(255, 0, 0));
    /// let orange = Lab::from(Rgb::new(255, 128, 0));
    /// assert_eq!(red.delta_e_2000(orange), orange.delta_e_2000(red));
    /// assert!(red.delta_e_2000(orange) > 10.0);
    /// ```
    pub fn delta_e_2000(self, other: Lab) -> f64 {
        let (l1, a1, b1) = (self.l, self.a, self.b);
        let (l2, a2, b2) = (other.l, other.a, other.b);

        let avg_lp = (l1 + l2) / 2.0;

        let c1 = (a1 * a1 + b1 * b1).sqrt();
        let c2 = (a2 * a2 + b2 * b2).sqrt();
        let avg_c = (c1 + c2) / 2.0;

        let avg_c7 = avg_c.powf(7.0);
        let g = 0.5 * (1.0 - (avg_c7 / (avg_c7 + POW25_7)).sqrt());

        let a1p = (1.0 + g) * a1;
        let a2p = (1.0 + g) * a2;

        let c1p = (a1p * a1p + b1 * b1).sqrt();
        let c2p = (a2p * a2p + b2 * b2).sqrt();
        let avg_cp = (c1p + c2p) / 2.0;

        let h1p = (rad2deg(b1.atan2(a1p)) + 360.0) % 360.0;
        let h2p = (rad2deg(b2.atan2(a2p)) + 360.0) % 360.0;

        // Hue is undefined when either chroma vanishes.
        let chroma_product = c1p * c2p;

        let delta_hp = if chroma_product != 0.0 {
            let diff = h2p - h1p;
            if diff.abs() <= 180.0 {
                diff
            } else if diff > 180.0 {
                diff - 360.0
            } else {
                diff + 360.0
            }
        } else {
            0.0
        };

        let delta_lp = l2 - l1;
        let delta_cp = c2p - c1p;
        let delta_big_hp = 2.0 * chroma_product.sqrt() * deg2rad(delta_hp / 2.0).sin();

        let avg_hp = if chroma_product == 0.0 {
            h1p + h2p
        } else if (h1p - h2p).abs() <= 180.0 {
            (h1p + h2p) / 2.0
        } else if h1p + h2p >= 360.0 {
            (h1p + h2p + 360.0) / 2.0 - 180.0
        } else {
            (h1p + h2p + 360.0) / 2.0
        };

        let t = 1.0 - 0.17 * deg2rad(avg_hp - 30.0).cos()
            + 0.24 * deg2rad(2.0 * avg_hp).cos()
            + 0.32 * deg2rad(3.0 * avg_hp + 6.0).cos()
            - 0.20 * deg2rad(4.0 * avg_hp - 63.0).cos();

        let delta_theta = 30.0 * (-((avg_hp - 275.0) / 25.0).powi(2)).exp();
        let avg_cp7 = avg_cp.powf(7.0);
        let rc = 2.0 * (avg_cp7 / (avg_cp7 + POW25_7)).sqrt();

        let l_mid_sq = (avg_lp - 50.0) * (avg_lp - 50.0);
        let sl = 1.0 + (0.015 * l_mid_sq) / (20.0 + l_mid_sq).sqrt();
        let sc = 1.0 + 0.045 * avg_cp;
        let sh = 1.0 + 0.015 * avg_cp * t;
        let rt = -deg2rad(2.0 * delta_theta).sin() * rc;

        let dl_term = delta_lp / sl;
        let dc_term = delta_cp / sc;
        let dh_term = delta_big_hp / sh;

        (dl_term * dl_term + dc_term * dc_term + dh_term * dh_term + rt * dc_term * dh_term).sqrt()
    }
}

impl From<Rgb> for Lab {
    /// Convert an 8-bit sRGB color to Lab through the gamma lookup table.
    fn from(rgb: Rgb) -> Self {
        Self::from_linear(to_linear(rgb.r), to_linear(rgb.g), to_linear(rgb.b))
    }
}

#[inline]
fn deg2rad(d: f64) -> f64 {
    (d * PI) / 180.0
}

#[inline]
fn rad2deg(r: f64) -> f64 {
    (r * 180.0) / PI
}

/// Lab companding: cube root above the CIE epsilon, linear segment below.
#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA_SLOPE * t + 16.0 / 116.0
    }
}
