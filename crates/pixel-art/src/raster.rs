//! RGBA raster buffers.
//!
//! [`RgbaImage`] is the only pixel container the pipeline exchanges with its
//! caller: row-major, four interleaved 8-bit channels per pixel.

use crate::api::ConvertError;
use crate::color::Rgb;

/// Pixels with alpha below this are treated as transparent by every stage.
pub const OPAQUE_ALPHA_MIN: u8 = 10;

/// An owned RGBA8 raster.
///
/// Construction validates that both dimensions are non-zero and that the
/// buffer holds exactly `width * height * 4` bytes, so every stage may index
/// it without further checks.
///
/// # Example
///
/// ```
/// use pixel_art::RgbaImage;
///
/// let image = RgbaImage::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 0]).unwrap();
/// assert!(image.is_opaque(0));
/// assert!(!image.is_opaque(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Wrap an RGBA buffer, validating its dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ConvertError> {
        let expected = buffer_len(width, height)?;
        if data.len() != expected {
            return Err(ConvertError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A fully transparent black raster.
    pub fn transparent(width: usize, height: usize) -> Result<Self, ConvertError> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Construct from parts already known to be consistent.
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// The interleaved RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Give up the buffer without copying.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Color of pixel `i` (row-major), ignoring alpha.
    #[inline]
    pub fn rgb(&self, i: usize) -> Rgb {
        let o = i * 4;
        Rgb::new(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    /// Alpha of pixel `i`.
    #[inline]
    pub fn alpha(&self, i: usize) -> u8 {
        self.data[i * 4 + 3]
    }

    /// Whether pixel `i` takes part in palette building and quantization.
    #[inline]
    pub fn is_opaque(&self, i: usize) -> bool {
        self.alpha(i) >= OPAQUE_ALPHA_MIN
    }

    /// Row-major pixel index of `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

/// `width * height * 4`, rejecting zero sizes and overflow.
pub(crate) fn buffer_len(width: usize, height: usize) -> Result<usize, ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(ConvertError::OutputTooLarge { width, height })
}
