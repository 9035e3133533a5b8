//! Edge-aware smoothing of the working raster.

use crate::color::store_channel;
use crate::raster::{RgbaImage, OPAQUE_ALPHA_MIN};

/// 3x3 spatial weights, row-major.
const KERNEL: [f64; 9] = [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0];

/// Neighbors further than this in luminance are not averaged in.
const MAX_LUM_DIFF: f64 = 0.15;

/// Neighbors further than this in summed absolute RGB are not averaged in.
const MAX_RGB_DIFF: u32 = 95;

/// Share of the local average mixed into each pixel.
const BLEND: f64 = 0.45;

/// Blend each opaque pixel partway toward a tonally gated local average.
///
/// Neighbors (edge-clamped 3x3) only contribute when they are opaque and
/// close to the center in both luminance and RGB, with weights falling off
/// as luminance diverges. Hard edges therefore stay sharp while flat
/// regions lose their noise. The result is 55% original and 45% average.
/// Transparent pixels keep their alpha and become black.
pub fn edge_aware_prefilter(image: &RgbaImage) -> RgbaImage {
    let (w, h) = (image.width(), image.height());
    let mut out = vec![0u8; image.data().len()];

    for y in 0..h {
        for x in 0..w {
            let i = image.index(x, y);
            let o = i * 4;
            out[o + 3] = image.alpha(i);
            if !image.is_opaque(i) {
                continue;
            }

            let center = image.rgb(i);
            let center_lum = center.luminance();
            let mut sum = [0.0f64; 3];
            let mut sum_w = 0.0;

            for (k, (dy, dx)) in (-1isize..=1)
                .flat_map(|dy| (-1isize..=1).map(move |dx| (dy, dx)))
                .enumerate()
            {
                let sy = y.saturating_add_signed(dy).min(h - 1);
                let sx = x.saturating_add_signed(dx).min(w - 1);
                let si = image.index(sx, sy);
                if image.alpha(si) < OPAQUE_ALPHA_MIN {
                    continue;
                }

                let color = image.rgb(si);
                let lum_diff = (center_lum - color.luminance()).abs();
                let rgb_diff = center.r.abs_diff(color.r) as u32
                    + center.g.abs_diff(color.g) as u32
                    + center.b.abs_diff(color.b) as u32;
                if lum_diff > MAX_LUM_DIFF || rgb_diff > MAX_RGB_DIFF {
                    continue;
                }

                let weight = KERNEL[k] * (1.0 - lum_diff / MAX_LUM_DIFF);
                for (s, c) in sum.iter_mut().zip(color.channels()) {
                    *s += c * weight;
                }
                sum_w += weight;
            }

            let channels = center.channels();
            for ch in 0..3 {
                out[o + ch] = if sum_w <= 0.0001 {
                    channels[ch] as u8
                } else {
                    let avg = sum[ch] / sum_w;
                    store_channel(channels[ch] * (1.0 - BLEND) + avg * BLEND)
                };
            }
        }
    }

    RgbaImage::from_parts(w, h, out)
}
