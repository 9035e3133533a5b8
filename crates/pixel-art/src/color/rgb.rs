//! 8-bit sRGB color type
//!
//! Raster pixels and palette entries are plain 8-bit sRGB triples. Anything
//! computed from them in floating point is brought back through the channel
//! helpers at the bottom of this file, which always clamp to 0..=255.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// Rec. 709 luma weights used for ramp ordering and edge contrast.
const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

/// A color in 8-bit sRGB.
///
/// # Example
///
/// ```
/// use pixel_art::Rgb;
///
/// let white = Rgb::new(255, 255, 255);
/// assert!((white.luminance() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Black, the fallback palette entry for images without opaque pixels.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a new color from 8-bit channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as floats on the 0..=255 scale.
    #[inline]
    pub fn channels(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Relative luminance in 0.0..=1.0, computed on the encoded values.
    ///
    /// This is deliberately not perceptual L\*; it orders palette ramps and
    /// measures outline contrast.
    #[inline]
    pub fn luminance(self) -> f64 {
        (LUMA_R * self.r as f64 + LUMA_G * self.g as f64 + LUMA_B * self.b as f64) / 255.0
    }

    /// Linear interpolation toward `other`; `t = 0` keeps `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use pixel_art::Rgb;
    ///
    /// let mid = Rgb::new(0, 0, 0).blend(Rgb::new(200, 100, 50), 0.5);
    /// assert_eq!(mid, Rgb::new(100, 50, 25));
    /// ```
    #[inline]
    pub fn blend(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| {
            let a = a as f64;
            round_channel(clamp255(a + (b as f64 - a) * t))
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Build a color from fractional channels, clamping and rounding each.
    ///
    /// ```
    /// use pixel_art::Rgb;
    ///
    /// assert_eq!(Rgb::from_channels([-4.0, 127.6, 300.0]), Rgb::new(0, 128, 255));
    /// ```
    #[inline]
    pub fn from_channels(channels: [f64; 3]) -> Rgb {
        let [r, g, b] = channels.map(|c| round_channel(clamp255(c)));
        Rgb::new(r, g, b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Rgb {
    /// Formats as lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use pixel_art::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// Clamp a channel value to 0.0..=255.0 (NaN maps to 0).
#[inline]
pub(crate) fn clamp255(x: f64) -> f64 {
    if x > 255.0 {
        255.0
    } else if x >= 0.0 {
        x
    } else {
        0.0
    }
}

/// Round to nearest, halves toward positive infinity.
#[inline]
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Store a float into an 8-bit raster channel: clamp, then round half to even.
#[inline]
pub(crate) fn store_channel(x: f64) -> u8 {
    clamp255(x).round_ties_even() as u8
}

#[inline]
fn round_channel(x: f64) -> u8 {
    x.round() as u8
}
