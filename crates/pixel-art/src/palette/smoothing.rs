//! Palette smoothing: near-duplicate merging, ramp enforcement and ramp
//! resampling.
//!
//! These run in sequence when palette smoothing is enabled, turning a raw
//! median-cut or preset palette into an evenly stepped dark-to-light ramp.

use crate::color::{clamp255, round_half_up, Lab, Rgb};

/// CIEDE2000 distance at or below which two palette colors are merged.
pub const MERGE_THRESHOLD: f64 = 6.0;

/// Minimum luminance distance between the darkest and lightest ramp targets.
const MIN_RAMP_HEIGHT: f64 = 0.35;

/// Floor for the luminance span the ramp targets are spread over.
const MIN_RAMP_SPAN: f64 = 0.2;

/// Share of the luminance-corrected color mixed into each ramp entry.
const RAMP_CORRECTION: f64 = 0.45;

/// Running-average cluster of merged palette colors.
struct Cluster {
    sum: [f64; 3],
    count: f64,
    lab: Lab,
}

impl Cluster {
    fn new(color: Rgb, lab: Lab) -> Self {
        Self {
            sum: color.channels(),
            count: 1.0,
            lab,
        }
    }

    fn mean(&self) -> Rgb {
        Rgb::from_channels(self.sum.map(|s| round_half_up(s / self.count)))
    }

    fn absorb(&mut self, color: Rgb) {
        for (s, c) in self.sum.iter_mut().zip(color.channels()) {
            *s += c;
        }
        self.count += 1.0;
        self.lab = Lab::from(self.mean());
    }
}

/// Collapse colors within `threshold` (CIEDE2000) of each other.
///
/// Colors are visited in order. Each joins the closest existing cluster if
/// that cluster is within the threshold, otherwise it starts a new one. The
/// result lists cluster means in creation order, so it depends on input
/// order and never grows.
///
/// # Example
///
/// ```
/// use pixel_art::{merge_near_duplicates, Rgb};
///
/// let merged = merge_near_duplicates(
///     &[Rgb::new(100, 100, 100), Rgb::new(102, 100, 100), Rgb::new(250, 20, 20)],
///     6.0,
/// );
/// assert_eq!(merged, vec![Rgb::new(101, 100, 100), Rgb::new(250, 20, 20)]);
/// ```
pub fn merge_near_duplicates(colors: &[Rgb], threshold: f64) -> Vec<Rgb> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for &color in colors {
        let lab = Lab::from(color);
        let mut best: Option<(usize, f64)> = None;
        for (i, cluster) in clusters.iter().enumerate() {
            let d = lab.delta_e_2000(cluster.lab);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }

        match best {
            Some((i, d)) if d <= threshold => clusters[i].absorb(color),
            _ => clusters.push(Cluster::new(color, lab)),
        }
    }

    clusters.iter().map(Cluster::mean).collect()
}

/// Sort by luminance and pull each entry toward an evenly spaced target
/// luminance.
///
/// Palettes of one or two colors are only sorted. Otherwise the targets run
/// from the darkest entry's luminance over a span of at least 0.35 (capped
/// at white); each entry is rescaled toward its target and the result mixes
/// 55% of the original with 45% of the rescaled color.
pub fn enforce_light_to_dark_ramp(colors: &[Rgb]) -> Vec<Rgb> {
    let mut sorted = colors.to_vec();
    // Stable, so equal-luminance entries keep their order
    sorted.sort_by(|a, b| a.luminance().total_cmp(&b.luminance()));

    let n = sorted.len();
    if n <= 2 {
        return sorted;
    }

    let low = sorted[0].luminance();
    let high = sorted[n - 1].luminance().max(low + MIN_RAMP_HEIGHT);
    let span = (high - low).max(MIN_RAMP_SPAN);

    sorted
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            let t = i as f64 / (n - 1) as f64;
            let target = (low + span * t).min(1.0);
            let scale = target / color.luminance().max(0.001);
            let channels = color.channels();
            let adjusted = channels.map(|c| clamp255(c * scale));
            Rgb::from_channels([0, 1, 2].map(|ch| {
                channels[ch] + (adjusted[ch] - channels[ch]) * RAMP_CORRECTION
            }))
        })
        .collect()
}

/// Resample a ramp to exactly `count` entries by linear interpolation.
///
/// An empty ramp yields black; `count <= 1` keeps only the first entry.
///
/// # Example
///
/// ```
/// use pixel_art::{sample_ramp, Rgb};
///
/// let ramp = sample_ramp(&[Rgb::new(0, 0, 0), Rgb::new(200, 200, 200)], 3);
/// assert_eq!(ramp[1], Rgb::new(100, 100, 100));
/// ```
pub fn sample_ramp(ramp: &[Rgb], count: usize) -> Vec<Rgb> {
    let Some(&first) = ramp.first() else {
        return vec![Rgb::BLACK];
    };
    if count <= 1 {
        return vec![first];
    }
    if ramp.len() == count {
        return ramp.to_vec();
    }

    let last = ramp.len() - 1;
    (0..count)
        .map(|i| {
            let pos = (i * last) as f64 / (count - 1) as f64;
            let i0 = pos.floor() as usize;
            let i1 = (i0 + 1).min(last);
            ramp[i0].blend(ramp[i1], pos - i0 as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey(v: u8) -> Rgb {
        Rgb::new(v, v, v)
    }

    fn is_non_decreasing(colors: &[Rgb]) -> bool {
        colors
            .windows(2)
            .all(|w| w[0].luminance() <= w[1].luminance())
    }

    #[test]
    fn test_merge_keeps_distinct_colors() {
        let colors = [grey(0), grey(128), grey(255), Rgb::new(255, 0, 0)];
        assert_eq!(merge_near_duplicates(&colors, MERGE_THRESHOLD), colors.to_vec());
    }

    #[test]
    fn test_merge_running_average() {
        let merged = merge_near_duplicates(&[grey(100), grey(101), grey(103)], MERGE_THRESHOLD);
        // (100 + 101 + 103) / 3 = 101.33
        assert_eq!(merged, vec![grey(101)]);
    }

    #[test]
    fn test_merge_zero_threshold_only_exact() {
        let merged = merge_near_duplicates(&[grey(50), grey(50), grey(51)], 0.0);
        assert_eq!(merged, vec![grey(50), grey(51)]);
    }

    #[test]
    fn test_merge_never_grows() {
        let colors: Vec<Rgb> = (0..40u8).map(|v| Rgb::new(v * 6, 255 - v * 3, v)).collect();
        for threshold in [0.0, 2.0, 6.0, 20.0] {
            assert!(merge_near_duplicates(&colors, threshold).len() <= colors.len());
        }
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_near_duplicates(&[], MERGE_THRESHOLD).is_empty());
    }

    #[test]
    fn test_ramp_small_palettes_only_sorted() {
        assert_eq!(
            enforce_light_to_dark_ramp(&[grey(200), grey(10)]),
            vec![grey(10), grey(200)]
        );
        assert_eq!(enforce_light_to_dark_ramp(&[grey(77)]), vec![grey(77)]);
    }

    #[test]
    fn test_ramp_is_monotonic() {
        let colors = [
            Rgb::new(230, 40, 40),
            grey(20),
            Rgb::new(40, 200, 60),
            grey(240),
            Rgb::new(30, 30, 200),
        ];
        let ramp = enforce_light_to_dark_ramp(&colors);
        assert_eq!(ramp.len(), colors.len());
        assert!(is_non_decreasing(&ramp));
    }

    #[test]
    fn test_ramp_endpoints() {
        // Darkest entry keeps its own luminance target; black stays black
        let ramp = enforce_light_to_dark_ramp(&[grey(255), grey(0), grey(128)]);
        assert_eq!(ramp[0], grey(0));
        assert_eq!(ramp[2], grey(255));
    }

    #[test]
    fn test_sample_ramp_edges() {
        assert_eq!(sample_ramp(&[], 4), vec![Rgb::BLACK]);
        assert_eq!(sample_ramp(&[grey(9), grey(99)], 1), vec![grey(9)]);
        assert_eq!(sample_ramp(&[grey(9), grey(99)], 0), vec![grey(9)]);
        assert_eq!(sample_ramp(&[grey(9), grey(99)], 2), vec![grey(9), grey(99)]);
    }

    #[test]
    fn test_sample_ramp_upsamples() {
        let ramp = sample_ramp(&[grey(0), grey(100), grey(200)], 5);
        assert_eq!(ramp, vec![grey(0), grey(50), grey(100), grey(150), grey(200)]);
    }

    #[test]
    fn test_sample_ramp_downsamples_keeps_ends() {
        let src: Vec<Rgb> = (0..10u8).map(|v| grey(v * 20)).collect();
        let ramp = sample_ramp(&src, 4);
        assert_eq!(ramp.len(), 4);
        assert_eq!(ramp[0], grey(0));
        assert_eq!(ramp[3], grey(180));
    }
}
