use crate::image_pipeline::common::clip;
use crate::image_pipeline::raw::RawPlane;

/// Horizontal and vertical green estimates for row `i`.
///
/// Green sites copy their sample into both `gh` and `gv`. Every other site
/// gets a 5-tap second-derivative-corrected average along each axis, clamped
/// to the range spanned by its two direct neighbors on that axis. The two
/// outermost columns (rows) copy their interior neighbor and the next ones in
/// average their two flanking samples.
///
/// # Panics
///
/// Panics if the plane is smaller than 3x3, `i` is out of range or either
/// output row is shorter than the plane width.
pub fn interpolate_row_g(plane: &RawPlane<'_>, gh: &mut [u16], gv: &mut [u16], i: usize) {
    let w = plane.width();
    let h = plane.height();
    assert!(w >= 3 && h >= 3, "green interpolation needs a 3x3 plane, got {w}x{h}");
    assert!(i < h, "row {i} outside plane of height {h}");
    assert!(gh.len() >= w && gv.len() >= w, "green rows shorter than width {w}");

    let raw = plane.row(i);
    for j in 0..w {
        if plane.is_green(i, j) {
            gh[j] = raw[j];
            gv[j] = raw[j];
        } else {
            gh[j] = clip(along_axis(j, w, |k| raw[k] as i32));
            gv[j] = clip(along_axis(i, h, |k| plane.get(k, j)));
        }
    }
}

/// Directional estimate at position `p` of a line of length `len`; `at(k)`
/// reads the sample at position `k` on that line.
#[inline(always)]
fn along_axis(p: usize, len: usize, at: impl Fn(usize) -> i32) -> i32 {
    if p > 1 && p < len - 2 {
        let (m1, p1) = (at(p - 1), at(p + 1));
        let g = (-at(p - 2) + 2 * m1 + 2 * at(p) + 2 * p1 - at(p + 2)) / 4;
        g.clamp(m1.min(p1), m1.max(p1))
    } else if p == 0 {
        at(1)
    } else if p == 1 {
        (at(0) + at(2)) / 2
    } else if p == len - 1 {
        at(len - 2)
    } else {
        (at(len - 1) + at(len - 3)) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::BayerPattern;

    fn mosaic(w: usize, h: usize, f: impl Fn(usize, usize) -> u16) -> Vec<u16> {
        (0..h).flat_map(|y| (0..w).map(move |x| (y, x))).map(|(y, x)| f(y, x)).collect()
    }

    #[test]
    fn green_sites_pass_through() {
        let (w, h) = (9, 7);
        let data = mosaic(w, h, |y, x| (y * 1000 + x * 37) as u16);
        for pattern in [BayerPattern::Rggb, BayerPattern::Gbrg] {
            let plane = RawPlane::new(&data, w, h, pattern).unwrap();
            let mut gh = vec![0u16; w];
            let mut gv = vec![0u16; w];
            for i in 0..h {
                interpolate_row_g(&plane, &mut gh, &mut gv, i);
                for j in 0..w {
                    if plane.is_green(i, j) {
                        assert_eq!(gh[j], data[i * w + j]);
                        assert_eq!(gv[j], data[i * w + j]);
                    }
                }
            }
        }
    }

    #[test]
    fn horizontal_estimate_clamped_to_neighbors() {
        // A bright red spike: the unclamped 5-tap result would be 30050.
        let w = 7;
        let h = 5;
        let mut data = vec![100u16; w * h];
        data[2 * w + 2] = 60000;
        let plane = RawPlane::new(&data, w, h, BayerPattern::Rggb).unwrap();
        let mut gh = vec![0u16; w];
        let mut gv = vec![0u16; w];
        interpolate_row_g(&plane, &mut gh, &mut gv, 2);
        assert!(plane.is_red(2, 2));
        assert_eq!(gh[2], 100);
        assert_eq!(gv[2], 100);
        // Two columns over the spike pulls the estimate negative; clamped back up.
        assert!(plane.is_red(2, 4));
        assert_eq!(gh[4], 100);
    }

    #[test]
    fn edge_columns_use_fallbacks() {
        let w = 6;
        let h = 6;
        let data = mosaic(w, h, |y, x| (y * 10 + x * 100) as u16);
        let plane = RawPlane::new(&data, w, h, BayerPattern::Rggb).unwrap();
        let mut gh = vec![0u16; w];
        let mut gv = vec![0u16; w];
        interpolate_row_g(&plane, &mut gh, &mut gv, 0);
        // (0, 0) red: copy column 1 horizontally, row 1 vertically.
        assert_eq!(gh[0], data[1]);
        assert_eq!(gv[0], data[w]);
        // (0, 4) red at W-2: average of columns W-1 and W-3.
        assert_eq!(gh[4], (data[5] + data[3]) / 2);

        interpolate_row_g(&plane, &mut gh, &mut gv, 1);
        // (1, 1) blue at near-edge row/column: two-sample averages.
        assert_eq!(gh[1], (data[w] + data[w + 2]) / 2);
        assert_eq!(gv[1], (data[1] + data[2 * w + 1]) / 2);
        // (1, 5) blue at W-1: copy column W-2.
        assert_eq!(gh[5], data[w + 4]);
    }

    #[test]
    fn smooth_ramp_is_reproduced() {
        let w = 12;
        let h = 10;
        let data = mosaic(w, h, |_, x| (1000 + x * 250) as u16);
        let plane = RawPlane::new(&data, w, h, BayerPattern::Grbg).unwrap();
        let mut gh = vec![0u16; w];
        let mut gv = vec![0u16; w];
        interpolate_row_g(&plane, &mut gh, &mut gv, 4);
        for j in 2..w - 2 {
            assert_eq!(gh[j], data[4 * w + j], "column {j}");
        }
    }
}
