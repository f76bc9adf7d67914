use rayon::prelude::*;

use crate::image_pipeline::colorspace::types::YiqImageData;
use crate::image_pipeline::common::clip;
use crate::image_pipeline::common::error::{DemosaicError, Result};
use crate::image_pipeline::debayer::RgbImageData;

/// Forward YIQ over a row; results are 1000 times the true values.
///
/// # Panics
///
/// Panics if the six rows differ in length.
pub fn convert_row_to_yiq(
    r: &[u16],
    g: &[u16],
    b: &[u16],
    y: &mut [i32],
    i: &mut [i32],
    q: &mut [i32],
) {
    let w = r.len();
    assert!(
        [g.len(), b.len(), y.len(), i.len(), q.len()].iter().all(|&len| len == w),
        "YIQ rows must all have length {w}"
    );
    for j in 0..w {
        let (rj, gj, bj) = (r[j] as i32, g[j] as i32, b[j] as i32);
        y[j] = 299 * rj + 587 * gj + 114 * bj;
        i[j] = 596 * rj - 275 * gj - 321 * bj;
        q[j] = 212 * rj - 523 * gj + 311 * bj;
    }
}

/// Inverse YIQ over a row, clamped into the sample range.
///
/// Only columns `1..W-1` are written; the first and last column keep
/// whatever the RGB rows already held.
///
/// # Panics
///
/// Panics if the six rows differ in length.
pub fn convert_row_to_rgb(
    r: &mut [u16],
    g: &mut [u16],
    b: &mut [u16],
    y: &[i32],
    i: &[i32],
    q: &[i32],
) {
    let w = r.len();
    assert!(
        [g.len(), b.len(), y.len(), i.len(), q.len()].iter().all(|&len| len == w),
        "YIQ rows must all have length {w}"
    );
    for j in 1..w.saturating_sub(1) {
        let luma = (y[j] / 1000) as f64;
        let (ij, qj) = (i[j] as f64, q[j] as f64);
        let ir = luma + 0.956 * ij / 1000.0 + 0.621 * qj / 1000.0;
        let ig = luma - 0.272 * ij / 1000.0 - 0.647 * qj / 1000.0;
        let ib = luma - 1.105 * ij / 1000.0 + 1.702 * qj / 1000.0;
        r[j] = clip(ir as i32);
        g[j] = clip(ig as i32);
        b[j] = clip(ib as i32);
    }
}

/// Row-parallel forward YIQ of a whole image.
pub fn rgb_to_yiq_image(rgb: &RgbImageData) -> YiqImageData {
    let w = rgb.width;
    let mut yiq = YiqImageData::new(rgb.width, rgb.height);
    if w == 0 {
        return yiq;
    }
    yiq.y
        .par_chunks_mut(w)
        .zip(yiq.i.par_chunks_mut(w))
        .zip(yiq.q.par_chunks_mut(w))
        .enumerate()
        .for_each(|(row, ((y, i), q))| {
            let span = row * w..(row + 1) * w;
            convert_row_to_yiq(&rgb.r[span.clone()], &rgb.g[span.clone()], &rgb.b[span], y, i, q);
        });
    yiq
}

/// Row-parallel inverse YIQ into `rgb`; edge columns of `rgb` are kept.
pub fn yiq_to_rgb_image(yiq: &YiqImageData, rgb: &mut RgbImageData) -> Result<()> {
    if (yiq.width, yiq.height) != (rgb.width, rgb.height) {
        return Err(DemosaicError::BufferSizeMismatch {
            expected: rgb.width * rgb.height,
            got: yiq.width * yiq.height,
        });
    }
    let w = rgb.width;
    if w == 0 {
        return Ok(());
    }
    rgb.r
        .par_chunks_mut(w)
        .zip(rgb.g.par_chunks_mut(w))
        .zip(rgb.b.par_chunks_mut(w))
        .enumerate()
        .for_each(|(row, ((r, g), b))| {
            let span = row * w..(row + 1) * w;
            convert_row_to_rgb(r, g, b, &yiq.y[span.clone()], &yiq.i[span.clone()], &yiq.q[span]);
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_is_scaled_by_1000() {
        let (r, g, b) = ([30000u16], [20000u16], [10000u16]);
        let (mut y, mut i, mut q) = ([0i32], [0i32], [0i32]);
        convert_row_to_yiq(&r, &g, &b, &mut y, &mut i, &mut q);
        assert_eq!(y[0], 21_850_000);
        assert_eq!(i[0], 9_170_000);
        assert_eq!(q[0], -990_000);
    }

    #[test]
    fn round_trip_interior_and_untouched_edges() {
        let w = 5;
        let r = vec![30000u16; w];
        let g = vec![20000u16; w];
        let b = vec![10000u16; w];
        let (mut y, mut i, mut q) = (vec![0i32; w], vec![0i32; w], vec![0i32; w]);
        convert_row_to_yiq(&r, &g, &b, &mut y, &mut i, &mut q);

        let mut r2 = vec![11u16; w];
        let mut g2 = vec![22u16; w];
        let mut b2 = vec![33u16; w];
        convert_row_to_rgb(&mut r2, &mut g2, &mut b2, &y, &i, &q);

        for j in 1..w - 1 {
            // The three-decimal inverse is not an exact inverse of the forward matrix.
            assert_eq!((r2[j], g2[j], b2[j]), (30001, 19996, 10032), "column {j}");
            assert!(r2[j].abs_diff(r[j]) <= 1);
        }
        for j in [0, w - 1] {
            assert_eq!((r2[j], g2[j], b2[j]), (11, 22, 33));
        }
    }

    #[test]
    fn inverse_clamps() {
        let w = 3;
        let mut r = vec![0u16; w];
        let mut g = vec![0u16; w];
        let mut b = vec![0u16; w];
        let y = vec![90_000_000; w];
        let i = vec![0; w];
        let q = vec![-90_000_000; w];
        convert_row_to_rgb(&mut r, &mut g, &mut b, &y, &i, &q);
        // R = 90000 - 55890, G = 90000 + 58230, B = 90000 - 153180
        assert_eq!((r[1], g[1], b[1]), (34110, 65535, 0));
    }

    #[test]
    fn image_helpers_match_rows() {
        let mut rgb = RgbImageData::new(4, 3);
        for (k, v) in rgb.r.iter_mut().enumerate() {
            *v = (k * 1000) as u16;
        }
        rgb.g.fill(20000);
        rgb.b.fill(5000);
        let yiq = rgb_to_yiq_image(&rgb);
        assert_eq!(yiq.y[5], 299 * 5000 + 587 * 20000 + 114 * 5000);

        let mut back = rgb.clone();
        back.r.fill(1);
        yiq_to_rgb_image(&yiq, &mut back).unwrap();
        assert_eq!(back.r[4], 1);
        assert_eq!(back.r[7], 1);
        assert!(back.r[5].abs_diff(5000) < 60);

        let mut wrong = RgbImageData::new(3, 3);
        assert!(yiq_to_rgb_image(&yiq, &mut wrong).is_err());
    }
}
