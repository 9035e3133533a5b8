//! Working-grid resampling.
//!
//! The source is shrunk onto the working grid with bilinear filtering and
//! the finished grid is blown back up with nearest-neighbor sampling, which
//! keeps every grid cell a crisp block in the output.

use crate::api::ConvertError;
use crate::color::store_channel;
use crate::raster::{buffer_len, RgbaImage};

/// Scale `(width, height)` to fit inside a `max` x `max` square.
///
/// Aspect ratio is preserved, images are never enlarged and neither side
/// drops below 1.
///
/// # Example
///
/// ```
/// use pixel_art::fit_within;
///
/// assert_eq!(fit_within(1000, 500, 100), (100, 50));
/// assert_eq!(fit_within(40, 30, 100), (40, 30));
/// ```
pub fn fit_within(width: usize, height: usize, max: usize) -> (usize, usize) {
    let (w, h, m) = (width as f64, height as f64, max as f64);
    let scale = (m / w).min(m / h).min(1.0);
    let fit = |d: f64| ((d * scale + 0.5).floor() as usize).max(1);
    (fit(w), fit(h))
}

/// Bilinear resample of all four channels onto a `width` x `height` grid.
///
/// Sample centers are aligned (`(x + 0.5) * ratio - 0.5`). Alpha is
/// interpolated like the color channels.
pub fn downscale_bilinear(
    src: &RgbaImage,
    width: usize,
    height: usize,
) -> Result<RgbaImage, ConvertError> {
    let mut dst = vec![0u8; buffer_len(width, height)?];
    let (src_w, src_h) = (src.width(), src.height());
    let x_ratio = src_w as f64 / width as f64;
    let y_ratio = src_h as f64 / height as f64;
    let data = src.data();

    for y in 0..height {
        let (y0, y1, ty) = taps(y, y_ratio, src_h);
        for x in 0..width {
            let (x0, x1, tx) = taps(x, x_ratio, src_w);

            let i00 = (y0 * src_w + x0) * 4;
            let i10 = (y0 * src_w + x1) * 4;
            let i01 = (y1 * src_w + x0) * 4;
            let i11 = (y1 * src_w + x1) * 4;
            let di = (y * width + x) * 4;

            for c in 0..4 {
                let v00 = data[i00 + c] as f64;
                let v10 = data[i10 + c] as f64;
                let v01 = data[i01 + c] as f64;
                let v11 = data[i11 + c] as f64;

                let v0 = v00 + (v10 - v00) * tx;
                let v1 = v01 + (v11 - v01) * tx;
                dst[di + c] = store_channel(v0 + (v1 - v0) * ty);
            }
        }
    }

    Ok(RgbaImage::from_parts(width, height, dst))
}

/// Source indices and fraction for destination coordinate `d`.
///
/// The fraction can go negative on the leading border; the caller clamps
/// the interpolated value.
#[inline]
fn taps(d: usize, ratio: f64, src_len: usize) -> (usize, usize, f64) {
    let s = (d as f64 + 0.5) * ratio - 0.5;
    let s0 = s.floor().max(0.0);
    let i0 = s0 as usize;
    let i1 = (i0 + 1).min(src_len - 1);
    (i0, i1, s - s0)
}

/// Nearest-neighbor resample onto a `width` x `height` grid.
pub fn upscale_nearest(
    src: &RgbaImage,
    width: usize,
    height: usize,
) -> Result<RgbaImage, ConvertError> {
    let mut out = vec![0u8; buffer_len(width, height)?];
    let (src_w, src_h) = (src.width(), src.height());
    let data = src.data();

    for y in 0..height {
        let sy = (y * src_h / height).min(src_h - 1);
        for x in 0..width {
            let sx = (x * src_w / width).min(src_w - 1);
            let si = (sy * src_w + sx) * 4;
            let di = (y * width + x) * 4;
            out[di..di + 4].copy_from_slice(&data[si..si + 4]);
        }
    }

    Ok(RgbaImage::from_parts(width, height, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(width: usize, height: usize, pixels: &[[u8; 4]]) -> RgbaImage {
        RgbaImage::new(width, height, pixels.concat()).unwrap()
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(1000, 500, 250), (250, 125));
        assert_eq!(fit_within(500, 1000, 250), (125, 250));
        assert_eq!(fit_within(100, 100, 250), (100, 100));
        assert_eq!(fit_within(10_000, 1, 100), (100, 1));
        assert_eq!(fit_within(3, 3, 2), (2, 2));
    }

    #[test]
    fn test_fit_within_rounds_half_up() {
        // 250 * 0.5 = 125, 5 * 0.5 = 2.5 -> 3
        assert_eq!(fit_within(500, 5, 250), (250, 3));
    }

    #[test]
    fn test_downscale_identity() {
        let src = image(2, 2, &[[1, 2, 3, 4], [50, 60, 70, 80], [9, 9, 9, 9], [200, 100, 0, 255]]);
        let out = downscale_bilinear(&src, 2, 2).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_downscale_averages_blocks() {
        let src = image(2, 2, &[[0, 0, 0, 255], [100, 0, 0, 255], [0, 100, 0, 255], [100, 100, 0, 255]]);
        let out = downscale_bilinear(&src, 1, 1).unwrap();
        assert_eq!(out.data(), &[50, 50, 0, 255]);
    }

    #[test]
    fn test_downscale_interpolates_alpha() {
        let src = image(2, 1, &[[10, 10, 10, 0], [10, 10, 10, 255]]);
        let out = downscale_bilinear(&src, 1, 1).unwrap();
        // 127.5 stores as 128 (half to even)
        assert_eq!(out.alpha(0), 128);
    }

    #[test]
    fn test_downscale_solid_stays_solid() {
        let src = image(3, 3, &[[40, 80, 120, 255]; 9]);
        let out = downscale_bilinear(&src, 2, 2).unwrap();
        assert_eq!(out.data(), [[40, 80, 120, 255]; 4].concat().as_slice());
    }

    #[test]
    fn test_downscale_rejects_zero_target() {
        let src = image(1, 1, &[[0, 0, 0, 255]]);
        assert!(matches!(
            downscale_bilinear(&src, 0, 1),
            Err(ConvertError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_upscale_blocks() {
        let src = image(2, 1, &[[255, 0, 0, 255], [0, 0, 255, 128]]);
        let out = upscale_nearest(&src, 4, 2).unwrap();
        let red = [255, 0, 0, 255];
        let blue = [0, 0, 255, 128];
        assert_eq!(out.data(), [red, red, blue, blue, red, red, blue, blue].concat().as_slice());
    }

    #[test]
    fn test_upscale_non_integer_factor() {
        let src = image(2, 1, &[[1, 1, 1, 255], [2, 2, 2, 255]]);
        let out = upscale_nearest(&src, 3, 1).unwrap();
        // x * 2 / 3 = 0, 0, 1
        assert_eq!(out.data(), [[1, 1, 1, 255], [1, 1, 1, 255], [2, 2, 2, 255]].concat().as_slice());
    }
}
