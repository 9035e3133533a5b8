//! Tiny-island cleanup for portrait mode.

use crate::output::IndexedImage;

/// Largest CIEDE2000 jump allowed when absorbing an island pixel.
const ISLAND_MAX_DELTA_E: f64 = 16.0;

/// Absorb single pixels that three or more of their 4-neighbors disagree
/// with.
///
/// For each interior pixel the most common index among N, S, E, W (first in
/// that order among equals) replaces the center when it covers at least
/// three neighbors and lies within ΔE 16.
pub fn cleanup_tiny_islands(grid: &IndexedImage) -> IndexedImage {
    let (w, h) = (grid.width(), grid.height());
    let palette = grid.palette();
    let idx = grid.indices();
    let mut out = idx.to_vec();

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let i = y * w + x;
            let center = idx[i];
            let candidates = [idx[i - w], idx[i + w], idx[i + 1], idx[i - 1]];

            let mut mode = center;
            let mut mode_count = 0;
            for (ci, &c) in candidates.iter().enumerate() {
                let count = 1 + candidates[ci + 1..].iter().filter(|&&o| o == c).count();
                if count > mode_count {
                    mode = c;
                    mode_count = count;
                }
            }

            if mode != center
                && mode_count >= 3
                && palette.distance(center as usize, mode as usize) <= ISLAND_MAX_DELTA_E
            {
                out[i] = mode;
            }
        }
    }

    grid.with_indices(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::Palette;

    fn grid(indices: Vec<u8>, width: usize, colors: &[Rgb]) -> IndexedImage {
        let height = indices.len() / width;
        let alpha = vec![255; indices.len()];
        IndexedImage::new(indices, alpha, width, height, Palette::new(colors).unwrap())
    }

    #[test]
    fn test_absorbs_similar_island() {
        let colors = [Rgb::new(180, 120, 100), Rgb::new(170, 115, 95)];
        let input = grid(vec![0, 0, 0, 0, 1, 0, 0, 1, 0], 3, &colors);
        // N, E, W are 0; S is 1 (the island's own color)
        let out = cleanup_tiny_islands(&input);
        assert_eq!(out.indices()[4], 0);
    }

    #[test]
    fn test_keeps_dissimilar_island() {
        let colors = [Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)];
        let input = grid(vec![0, 0, 0, 0, 1, 0, 0, 0, 0], 3, &colors);
        assert_eq!(cleanup_tiny_islands(&input).indices()[4], 1);
    }

    #[test]
    fn test_needs_three_agreeing_neighbors() {
        let colors = [
            Rgb::new(100, 100, 100),
            Rgb::new(104, 104, 104),
            Rgb::new(108, 108, 108),
        ];
        // N=0, S=0, E=2, W=2
        let input = grid(vec![0, 0, 0, 2, 1, 2, 0, 0, 0], 3, &colors);
        assert_eq!(cleanup_tiny_islands(&input).indices()[4], 1);
    }

    #[test]
    fn test_thin_grids_untouched() {
        let colors = [Rgb::new(100, 100, 100), Rgb::new(104, 104, 104)];
        let input = grid(vec![0, 1, 0], 3, &colors);
        assert_eq!(cleanup_tiny_islands(&input).indices(), &[0, 1, 0]);
    }
}
