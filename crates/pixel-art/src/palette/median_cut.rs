//! Median-cut palette extraction.
//!
//! Colors are sampled from the opaque pixels of the working raster and
//! recursively split at the median of their widest RGB channel until the
//! requested number of boxes exists. Each box contributes its mean color.

use crate::color::{round_half_up, Rgb};
use crate::raster::RgbaImage;

/// Rasters with more pixels than this are sampled on every other row and column.
const FULL_SAMPLE_LIMIT: usize = 20_000;

/// An axis-aligned box in RGB space holding the colors it covers.
#[derive(Debug, Clone)]
struct ColorBox {
    colors: Vec<Rgb>,
    range: [u8; 3],
}

impl ColorBox {
    fn new(colors: Vec<Rgb>) -> Self {
        let mut min = [255u8; 3];
        let mut max = [0u8; 3];
        for c in &colors {
            for (ch, v) in c.to_bytes().into_iter().enumerate() {
                min[ch] = min[ch].min(v);
                max[ch] = max[ch].max(v);
            }
        }
        let range = [
            max[0].saturating_sub(min[0]),
            max[1].saturating_sub(min[1]),
            max[2].saturating_sub(min[2]),
        ];
        Self { colors, range }
    }

    /// Largest per-channel extent; splitting priority.
    fn widest(&self) -> u8 {
        self.range[0].max(self.range[1]).max(self.range[2])
    }

    /// Channel to cut along. Green wins ties, then blue, then red.
    fn split_channel(&self) -> usize {
        let [r, g, b] = self.range;
        if g >= r && g >= b {
            1
        } else if b >= r && b >= g {
            2
        } else {
            0
        }
    }

    /// Split at the median of the widest channel. The lower half gets
    /// `len / 2` colors.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let ch = self.split_channel();
        self.colors.sort_by_key(|c| c.to_bytes()[ch]);
        let upper = self.colors.split_off(self.colors.len() / 2);
        (ColorBox::new(self.colors), ColorBox::new(upper))
    }

    fn mean(&self) -> Rgb {
        let mut sum = [0.0f64; 3];
        for c in &self.colors {
            for (s, v) in sum.iter_mut().zip(c.channels()) {
                *s += v;
            }
        }
        let n = self.colors.len().max(1) as f64;
        Rgb::from_channels(sum.map(|s| round_half_up(s / n)))
    }
}

/// Extract up to `k` representative colors from the opaque pixels of `image`.
///
/// A raster with no opaque pixels yields a single black entry. Fewer than
/// `k` colors come back when the sampled pixels cannot be split further;
/// the unsplittable box is kept.
/// `k = 0` is treated as 1.
///
/// # Example
///
/// ```
/// use pixel_art::{median_cut, Rgb, RgbaImage};
///
/// let data = [[255, 0, 0, 255], [0, 0, 255, 255]].concat();
/// let image = RgbaImage::new(2, 1, data).unwrap();
/// let palette = median_cut(&image, 2);
/// assert_eq!(palette, vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]);
/// ```
pub fn median_cut(image: &RgbaImage, k: usize) -> Vec<Rgb> {
    let k = k.max(1);
    let colors = sample_opaque(image);
    if colors.is_empty() {
        return vec![Rgb::BLACK];
    }

    let mut boxes = vec![ColorBox::new(colors)];
    while boxes.len() < k {
        // Stable: earlier boxes win among equal extents
        boxes.sort_by(|a, b| b.widest().cmp(&a.widest()));
        if boxes[0].colors.len() < 2 {
            break;
        }
        let candidate = boxes.remove(0);
        let (lo, hi) = candidate.split();
        boxes.push(lo);
        boxes.push(hi);
    }

    boxes.iter().take(k).map(ColorBox::mean).collect()
}

fn sample_opaque(image: &RgbaImage) -> Vec<Rgb> {
    let stride = if image.pixel_count() > FULL_SAMPLE_LIMIT {
        2
    } else {
        1
    };

    let mut colors = Vec::new();
    for y in (0..image.height()).step_by(stride) {
        for x in (0..image.width()).step_by(stride) {
            let i = image.index(x, y);
            if image.is_opaque(i) {
                colors.push(image.rgb(i));
            }
        }
    }
    colors
}
