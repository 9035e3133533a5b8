//! Conservative speckle removal and micro-ramp correction.

use crate::color::round_half_up;
use crate::output::IndexedImage;

/// Minimum 8-neighbor agreement for speckle replacement.
const SPECKLE_MAJORITY: usize = 6;

/// Largest CIEDE2000 jump allowed when replacing a speckle.
const SPECKLE_MAX_DELTA_E: f64 = 12.0;

/// Largest CIEDE2000 jump allowed for a one-rank ramp shift.
const RAMP_MAX_DELTA_E: f64 = 8.0;

/// Remove isolated speckles and smooth tiny luminance steps in flat areas.
///
/// Interior pixels whose strongest 8-neighbor luminance contrast reaches
/// `max(0.12, 0.75 * edge_threshold)` are treated as edges and left alone.
/// Elsewhere:
///
/// 1. If one index holds at least 6 of the 8 neighbors, differs from the
///    center and lies within ΔE 12 of it, it replaces the center.
/// 2. Otherwise, if the center's luminance rank differs from the rounded
///    neighbor mean rank by more than one, the center moves one rank toward
///    that mean, provided the move stays within ΔE 8.
///
/// Grids narrower or shorter than 3, and single-color palettes, pass
/// through unchanged.
pub fn conservative_smooth(grid: &IndexedImage, edge_threshold: f64) -> IndexedImage {
    let (w, h) = (grid.width(), grid.height());
    let palette = grid.palette();
    let idx = grid.indices();
    let mut out = idx.to_vec();

    if w < 3 || h < 3 || palette.len() < 2 {
        return grid.with_indices(out);
    }

    let ranks = palette.ranks();
    let by_rank = palette.by_rank();
    let preserve = (edge_threshold * 0.75).max(0.12);
    let mut counts = [0usize; 256];

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            let center = idx[i] as usize;
            let center_lum = palette.luminance(center);

            let neighbors = [
                idx[i - w - 1],
                idx[i - w],
                idx[i - w + 1],
                idx[i - 1],
                idx[i + 1],
                idx[i + w - 1],
                idx[i + w],
                idx[i + w + 1],
            ]
            .map(usize::from);

            let mut max_contrast = 0.0f64;
            let mut rank_sum = 0usize;
            for &n in &neighbors {
                max_contrast = max_contrast.max((center_lum - palette.luminance(n)).abs());
                rank_sum += ranks[n];
            }
            if max_contrast >= preserve {
                continue;
            }

            // First index to reach the highest count wins
            counts.fill(0);
            let mut mode = center;
            let mut mode_count = 0;
            for &n in &neighbors {
                counts[n] += 1;
                if counts[n] > mode_count {
                    mode_count = counts[n];
                    mode = n;
                }
            }

            if mode != center
                && mode_count >= SPECKLE_MAJORITY
                && palette.distance(center, mode) <= SPECKLE_MAX_DELTA_E
            {
                out[i] = mode as u8;
                continue;
            }

            let avg_rank = round_half_up(rank_sum as f64 / 8.0) as usize;
            let center_rank = ranks[center];
            if avg_rank.abs_diff(center_rank) <= 1 || palette.len() < 3 {
                continue;
            }

            let target_rank = if avg_rank > center_rank {
                (center_rank + 1).min(palette.len() - 1)
            } else {
                center_rank.saturating_sub(1)
            };
            let target = by_rank[target_rank];
            if palette.distance(center, target) <= RAMP_MAX_DELTA_E {
                out[i] = target as u8;
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

    fn greys(values: &[u8]) -> Vec<Rgb> {
        values.iter().map(|&v| Rgb::new(v, v, v)).collect()
    }

    #[test]
    fn test_removes_low_contrast_speckle() {
        // Entries 100 and 104 are within ΔE 12 and well below the contrast guard
        let colors = greys(&[100, 104]);
        let input = grid(vec![0, 0, 0, 0, 1, 0, 0, 0, 0], 3, &colors);
        let out = conservative_smooth(&input, 0.22);
        assert_eq!(out.indices(), &[0; 9]);
    }

    #[test]
    fn test_keeps_high_contrast_pixel() {
        let colors = greys(&[0, 255]);
        let input = grid(vec![0, 0, 0, 0, 1, 0, 0, 0, 0], 3, &colors);
        let out = conservative_smooth(&input, 0.22);
        assert_eq!(out.indices(), input.indices());
    }

    #[test]
    fn test_small_grids_pass_through() {
        let colors = greys(&[100, 104]);
        let input = grid(vec![0, 1, 0, 1, 0, 1], 2, &colors);
        assert_eq!(conservative_smooth(&input, 0.22).indices(), input.indices());

        let single = grid(vec![0; 9], 3, &greys(&[50]));
        assert_eq!(conservative_smooth(&single, 0.22).indices(), &[0; 9]);
    }

    #[test]
    fn test_border_untouched() {
        let colors = greys(&[100, 104]);
        let mut indices = vec![0u8; 16];
        indices[0] = 1;
        indices[15] = 1;
        let input = grid(indices.clone(), 4, &colors);
        let out = conservative_smooth(&input, 0.22);
        assert_eq!(out.indices()[0], 1);
        assert_eq!(out.indices()[15], 1);
    }

    #[test]
    fn test_ramp_shift_one_step() {
        // Ranks follow palette order. No index holds 6 neighbors, the
        // neighbors average to rank 3 and the center at rank 0 moves to 1
        let colors = greys(&[100, 102, 104, 106]);
        let input = grid(vec![3, 3, 3, 2, 0, 2, 3, 2, 3], 3, &colors);
        let out = conservative_smooth(&input, 0.22);
        assert_eq!(out.indices()[4], 1);
    }

    #[test]
    fn test_reads_input_grid_only() {
        // Two adjacent speckles: each sees the other's original value
        let colors = greys(&[100, 104]);
        #[rustfmt::skip]
        let input = grid(vec![
            0, 0, 0, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
        ], 4, &colors);
        let out = conservative_smooth(&input, 0.22);
        // 7 of 8 neighbors are 0 for each speckle
        assert_eq!(out.indices(), &[0; 12]);
    }
}
