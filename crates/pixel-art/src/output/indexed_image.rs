//! IndexedImage struct: palette indices plus preserved alpha.

use crate::palette::Palette;
use crate::raster::{RgbaImage, OPAQUE_ALPHA_MIN};

/// A quantized working grid.
///
/// Stores one `u8` palette index and one alpha value per pixel in row-major
/// order, along with the grid dimensions and the palette the indices refer
/// to. Transparent pixels (alpha below 10) carry an index like every other
/// pixel, but rendering ignores it.
///
/// # Example
///
/// ```
/// use pixel_art::{IndexedImage, Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let image = IndexedImage::new(vec![1, 0], vec![255, 0], 2, 1, palette);
///
/// let rgba = image.to_rgba();
/// assert_eq!(rgba.data(), &[255, 255, 255, 255, 0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedImage {
    /// Palette indices, one per pixel, row-major order.
    indices: Vec<u8>,
    /// Alpha carried over from the working grid.
    alpha: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexedImage {
    /// Create a new `IndexedImage`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that both `indices` and `alpha` hold `width * height`
    /// entries and that every index is within the palette.
    pub fn new(
        indices: Vec<u8>,
        alpha: Vec<u8>,
        width: usize,
        height: usize,
        palette: Palette,
    ) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        debug_assert_eq!(alpha.len(), width * height);
        debug_assert!(indices.iter().all(|&i| (i as usize) < palette.len()));
        Self {
            indices,
            alpha,
            width,
            height,
            palette,
        }
    }

    /// Same grid with its indices replaced.
    pub(crate) fn with_indices(&self, indices: Vec<u8>) -> Self {
        Self::new(
            indices,
            self.alpha.clone(),
            self.width,
            self.height,
            self.palette.clone(),
        )
    }

    /// Palette indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Per-pixel alpha in row-major order.
    #[inline]
    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Grid width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render to RGBA.
    ///
    /// Opaque pixels take their palette color; transparent pixels become
    /// black with their original alpha.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut data = Vec::with_capacity(self.indices.len() * 4);
        for (&idx, &a) in self.indices.iter().zip(&self.alpha) {
            if a < OPAQUE_ALPHA_MIN {
                data.extend_from_slice(&[0, 0, 0, a]);
            } else {
                let [r, g, b] = self.palette.color(idx as usize).to_bytes();
                data.extend_from_slice(&[r, g, b, a]);
            }
        }
        RgbaImage::from_parts(self.width, self.height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn palette() -> Palette {
        Palette::new(&[
            Rgb::new(0, 0, 0),
            Rgb::new(255, 0, 0),
            Rgb::new(255, 255, 255),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_stores_fields() {
        let image = IndexedImage::new(vec![0, 1, 2, 0, 1, 2], vec![255; 6], 3, 2, palette());

        assert_eq!(image.indices(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.palette().len(), 3);
    }

    #[test]
    fn test_to_rgba_keeps_partial_alpha() {
        let image = IndexedImage::new(vec![1], vec![200], 1, 1, palette());
        assert_eq!(image.to_rgba().data(), &[255, 0, 0, 200]);
    }

    #[test]
    fn test_to_rgba_blanks_transparent() {
        let image = IndexedImage::new(vec![2, 2], vec![9, 10], 2, 1, palette());
        assert_eq!(image.to_rgba().data(), &[0, 0, 0, 9, 255, 255, 255, 10]);
    }

    #[test]
    fn test_with_indices_keeps_alpha() {
        let image = IndexedImage::new(vec![0, 0], vec![255, 3], 2, 1, palette());
        let swapped = image.with_indices(vec![2, 1]);
        assert_eq!(swapped.indices(), &[2, 1]);
        assert_eq!(swapped.alpha(), &[255, 3]);
    }
}
