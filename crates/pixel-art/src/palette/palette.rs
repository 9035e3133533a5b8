//! Palette struct with precomputed perceptual data and nearest-color matching.

use std::str::FromStr;

use super::error::PaletteError;
use crate::color::{Lab, Rgb};

/// An ordered list of colors that quantized pixels index into.
///
/// Every entry carries its Lab coordinates and luminance, computed once at
/// construction. Matching, cleanup and outline passes only ever consult
/// those caches, never re-deriving them per pixel.
///
/// Duplicate entries are allowed: ramp resampling can legitimately produce
/// them. Matching ties resolve to the lowest index.
///
/// # Example
///
/// ```
/// use pixel_art::{Lab, Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let (idx, _) = palette.find_nearest(Lab::from(Rgb::new(200, 200, 200)));
/// assert_eq!(idx, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    lab: Vec<Lab>,
    luminance: Vec<f64>,
}

impl Palette {
    /// Largest palette addressable by the 8-bit index grid.
    pub const MAX_COLORS: usize = 256;

    /// Create a palette from colors in index order.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] if it exceeds [`Palette::MAX_COLORS`]
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > Self::MAX_COLORS {
            return Err(PaletteError::TooManyColors {
                len: colors.len(),
                max: Self::MAX_COLORS,
            });
        }

        Ok(Self {
            colors: colors.to_vec(),
            lab: colors.iter().map(|&c| Lab::from(c)).collect(),
            luminance: colors.iter().map(|c| c.luminance()).collect(),
        })
    }

    /// Create a palette from hex color strings such as `"#ff8800"` or `"f80"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any string is not a valid
    /// color, plus the errors of [`Palette::new`].
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| Rgb::from_str(s))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entry colors in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at `idx`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// Lab coordinates of the entry at `idx`.
    #[inline]
    pub fn lab(&self, idx: usize) -> Lab {
        self.lab[idx]
    }

    /// Luminance of the entry at `idx`.
    #[inline]
    pub fn luminance(&self, idx: usize) -> f64 {
        self.luminance[idx]
    }

    /// Find the entry perceptually closest to `color` under CIEDE2000.
    ///
    /// Returns `(index, distance)`. On ties the earliest entry wins.
    #[inline]
    pub fn find_nearest(&self, color: Lab) -> (usize, f64) {
        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;

        for (i, &entry) in self.lab.iter().enumerate() {
            let dist = color.delta_e_2000(entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }

    /// CIEDE2000 distance between two entries.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.lab[a].delta_e_2000(self.lab[b])
    }

    /// Index of the darkest entry; the first one wins among equals.
    pub fn darkest_index(&self) -> usize {
        let mut best = 0;
        for (i, &lum) in self.luminance.iter().enumerate().skip(1) {
            if lum < self.luminance[best] {
                best = i;
            }
        }
        best
    }

    /// Rank of every entry when ordered dark to light.
    ///
    /// `ranks()[i]` is the position of entry `i` in a stable sort by
    /// luminance, so equal entries keep their index order.
    pub fn ranks(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.luminance[a].total_cmp(&self.luminance[b]));

        let mut ranks = vec![0; self.len()];
        for (rank, &idx) in order.iter().enumerate() {
            ranks[idx] = rank;
        }
        ranks
    }

    /// Entry indices ordered dark to light (the inverse of [`Palette::ranks`]).
    pub fn by_rank(&self) -> Vec<usize> {
        let ranks = self.ranks();
        let mut order = vec![0; self.len()];
        for (idx, &rank) in ranks.iter().enumerate() {
            order[rank] = idx;
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey(v: u8) -> Rgb {
        Rgb::new(v, v, v)
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Palette::new(&[]), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_rejects_oversized() {
        let colors = vec![Rgb::BLACK; 257];
        assert_eq!(
            Palette::new(&colors),
            Err(PaletteError::TooManyColors { len: 257, max: 256 })
        );
    }

    #[test]
    fn test_allows_duplicates() {
        let palette = Palette::new(&[grey(10), grey(10)]).unwrap();
        assert_eq!(palette.len(), 2);
        // Ties go to the first entry
        assert_eq!(palette.find_nearest(Lab::from(grey(10))).0, 0);
    }

    #[test]
    fn test_from_hex() {
        let palette = Palette::from_hex(&["#000", "ffffff"]).unwrap();
        assert_eq!(palette.color(1), grey(255));
        assert!(matches!(
            Palette::from_hex(&["#12"]),
            Err(PaletteError::ParseColor(_))
        ));
    }

    #[test]
    fn test_find_nearest_exact() {
        let palette = Palette::new(&[grey(0), Rgb::new(255, 0, 0), grey(255)]).unwrap();
        let (idx, dist) = palette.find_nearest(Lab::from(Rgb::new(255, 0, 0)));
        assert_eq!(idx, 1);
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_darkest_index_first_wins() {
        let palette = Palette::new(&[grey(200), grey(5), grey(5), grey(90)]).unwrap();
        assert_eq!(palette.darkest_index(), 1);
    }

    #[test]
    fn test_ranks_and_order() {
        let palette = Palette::new(&[grey(200), grey(5), grey(90), grey(5)]).unwrap();
        assert_eq!(palette.ranks(), vec![3, 0, 2, 1]);
        assert_eq!(palette.by_rank(), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_distance_symmetric() {
        let palette = Palette::new(&[Rgb::new(40, 90, 200), Rgb::new(230, 180, 20)]).unwrap();
        assert_eq!(palette.distance(0, 1), palette.distance(1, 0));
        assert_eq!(palette.distance(0, 0), 0.0);
    }
}
