//! Red/blue reconstruction from the raw plane and a three-row green window.
//!
//! Both entry points share one routine over the row's [`RowPolarity`]: on a
//! red row the native channel is red and the opposite one blue, and the other
//! way round on a blue row. At native sites the opposite channel comes from
//! the in-bounds diagonal neighbors' color differences. At green sites the
//! native channel is interpolated horizontally and the opposite one
//! vertically, both against the green estimates.

use crate::image_pipeline::common::{clip, clip_f64};
use crate::image_pipeline::debayer::types::{RowPolarity, Subsample, WhiteBalance};
use crate::image_pipeline::raw::{Channel, RawPlane};

/// Red and blue for every column of row `i`.
///
/// `pg`, `cg` and `ng` are the green rows `i - 1`, `i` and `i + 1`. On the
/// first and last rows the missing neighbor may be any row of the right
/// length; it is never read.
///
/// # Panics
///
/// Panics if the plane is smaller than 3x3, `i` is out of range or any row
/// buffer is shorter than the plane width.
pub fn interpolate_row_rb(
    plane: &RawPlane<'_>,
    r: &mut [u16],
    b: &mut [u16],
    pg: &[u16],
    cg: &[u16],
    ng: &[u16],
    i: usize,
) {
    let w = plane.width();
    assert!(r.len() >= w && b.len() >= w, "red/blue rows shorter than width {w}");
    let window = GreenWindow::new(plane, pg, cg, ng, i);
    interpolate_row(&window, r, b, &Plain, Subsample::full(w));
}

/// White-balanced red and blue for a column window of row `i`.
///
/// Every raw sample is scaled by its channel's multiplier and every green
/// estimate by `g_mul` before the color differences are formed. Output
/// sample `k` is taken at raw column `sub.x1 + k * sub.skip`.
///
/// # Panics
///
/// As [`interpolate_row_rb`], and also if `sub` leaves the row or either
/// output row is shorter than `sub.width`.
#[allow(clippy::too_many_arguments)]
pub fn interpolate_row_rb_mul(
    plane: &RawPlane<'_>,
    r: &mut [u16],
    b: &mut [u16],
    pg: &[u16],
    cg: &[u16],
    ng: &[u16],
    i: usize,
    wb: &WhiteBalance,
    sub: Subsample,
) {
    assert!(
        sub.is_valid_for(plane.width()),
        "subsample {sub:?} outside row of width {}",
        plane.width()
    );
    assert!(
        r.len() >= sub.width && b.len() >= sub.width,
        "red/blue rows shorter than {}",
        sub.width
    );
    let window = GreenWindow::new(plane, pg, cg, ng, i);
    interpolate_row(&window, r, b, &Scaled(*wb), sub);
}

/// Raw plane plus the green rows around row `i`.
struct GreenWindow<'a, 'p> {
    plane: &'a RawPlane<'p>,
    pg: &'a [u16],
    cg: &'a [u16],
    ng: &'a [u16],
    i: usize,
}

impl<'a, 'p> GreenWindow<'a, 'p> {
    fn new(plane: &'a RawPlane<'p>, pg: &'a [u16], cg: &'a [u16], ng: &'a [u16], i: usize) -> Self {
        let (w, h) = (plane.width(), plane.height());
        assert!(w >= 3 && h >= 3, "red/blue interpolation needs a 3x3 plane, got {w}x{h}");
        assert!(i < h, "row {i} outside plane of height {h}");
        assert!(
            pg.len() >= w && cg.len() >= w && ng.len() >= w,
            "green rows shorter than width {w}"
        );
        Self { plane, pg, cg, ng, i }
    }
}

/// How color differences are scaled and rounded.
trait RowArithmetic {
    fn channel_mul(&self, channel: Channel) -> f64;
    /// Native sample at its own site.
    fn passthrough(&self, raw: i32, mul: f64) -> u16;
    /// `sum` plus one diagonal color difference.
    fn accumulate(&self, sum: i32, raw: i32, green: u16, mul: f64) -> i32;
    /// `cg` plus the mean of `n` accumulated differences.
    fn cross(&self, cg: u16, sum: i32, n: i32) -> u16;
    /// `base + (raw - green)`.
    fn one_sided(&self, base: u16, raw: i32, green: u16, mul: f64) -> u16;
    /// `center` plus the mean of two color differences.
    fn two_sided(&self, center: u16, a: (i32, u16), b: (i32, u16), mul: f64) -> u16;
}

/// Integer arithmetic with truncating division.
struct Plain;

impl RowArithmetic for Plain {
    #[inline(always)]
    fn channel_mul(&self, _channel: Channel) -> f64 {
        1.0
    }

    #[inline(always)]
    fn passthrough(&self, raw: i32, _mul: f64) -> u16 {
        clip(raw)
    }

    #[inline(always)]
    fn accumulate(&self, sum: i32, raw: i32, green: u16, _mul: f64) -> i32 {
        sum + raw - green as i32
    }

    #[inline(always)]
    fn cross(&self, cg: u16, sum: i32, n: i32) -> u16 {
        clip(cg as i32 + sum / n)
    }

    #[inline(always)]
    fn one_sided(&self, base: u16, raw: i32, green: u16, _mul: f64) -> u16 {
        clip(base as i32 + raw - green as i32)
    }

    #[inline(always)]
    fn two_sided(&self, center: u16, a: (i32, u16), b: (i32, u16), _mul: f64) -> u16 {
        clip(center as i32 + (a.0 - a.1 as i32 + b.0 - b.1 as i32) / 2)
    }
}

/// Float arithmetic on multiplied samples. The diagonal sum is truncated
/// toward zero after every addition and each result before clamping.
struct Scaled(WhiteBalance);

impl RowArithmetic for Scaled {
    #[inline(always)]
    fn channel_mul(&self, channel: Channel) -> f64 {
        self.0.mul(channel)
    }

    #[inline(always)]
    fn passthrough(&self, raw: i32, mul: f64) -> u16 {
        clip_f64(mul * raw as f64)
    }

    #[inline(always)]
    fn accumulate(&self, sum: i32, raw: i32, green: u16, mul: f64) -> i32 {
        (sum as f64 + (mul * raw as f64 - self.0.g_mul * green as f64)) as i32
    }

    #[inline(always)]
    fn cross(&self, cg: u16, sum: i32, n: i32) -> u16 {
        clip((self.0.g_mul * cg as f64 + (sum / n) as f64) as i32)
    }

    #[inline(always)]
    fn one_sided(&self, base: u16, raw: i32, green: u16, mul: f64) -> u16 {
        clip((self.0.g_mul * base as f64 + mul * raw as f64 - self.0.g_mul * green as f64) as i32)
    }

    #[inline(always)]
    fn two_sided(&self, center: u16, a: (i32, u16), b: (i32, u16), mul: f64) -> u16 {
        let g = self.0.g_mul;
        let diff = mul * a.0 as f64 - g * a.1 as f64 + mul * b.0 as f64 - g * b.1 as f64;
        clip((g * center as f64 + diff / 2.0) as i32)
    }
}

fn interpolate_row<A: RowArithmetic>(
    win: &GreenWindow<'_, '_>,
    r: &mut [u16],
    b: &mut [u16],
    arith: &A,
    sub: Subsample,
) {
    let plane = win.plane;
    let (w, h, i) = (plane.width(), plane.height(), win.i);
    let (pg, cg, ng) = (win.pg, win.cg, win.ng);

    let polarity = RowPolarity::of_row(plane, i);
    let native_color = polarity.native();
    let native_mul = arith.channel_mul(native_color);
    let opposite_mul = arith.channel_mul(polarity.opposite());
    let (native_out, opposite_out) = match polarity {
        RowPolarity::RedNative => (r, b),
        RowPolarity::BlueNative => (b, r),
    };

    for (jx, j) in sub.columns() {
        if plane.color_at(i, j) == native_color {
            native_out[jx] = arith.passthrough(plane.get(i, j), native_mul);

            let mut sum = 0;
            let mut n = 0;
            if i > 0 && j > 0 {
                sum = arith.accumulate(sum, plane.get(i - 1, j - 1), pg[j - 1], opposite_mul);
                n += 1;
            }
            if i > 0 && j < w - 1 {
                sum = arith.accumulate(sum, plane.get(i - 1, j + 1), pg[j + 1], opposite_mul);
                n += 1;
            }
            if i < h - 1 && j > 0 {
                sum = arith.accumulate(sum, plane.get(i + 1, j - 1), ng[j - 1], opposite_mul);
                n += 1;
            }
            if i < h - 1 && j < w - 1 {
                sum = arith.accumulate(sum, plane.get(i + 1, j + 1), ng[j + 1], opposite_mul);
                n += 1;
            }
            opposite_out[jx] = arith.cross(cg[j], sum, n);
        } else {
            native_out[jx] = if j == 0 {
                arith.one_sided(cg[0], plane.get(i, 1), cg[1], native_mul)
            } else if j == w - 1 {
                arith.one_sided(cg[w - 1], plane.get(i, w - 2), cg[w - 2], native_mul)
            } else {
                arith.two_sided(
                    cg[j],
                    (plane.get(i, j - 1), cg[j - 1]),
                    (plane.get(i, j + 1), cg[j + 1]),
                    native_mul,
                )
            };

            // First and last rows extrapolate from the only neighbor row.
            opposite_out[jx] = if i == 0 {
                arith.one_sided(ng[j], plane.get(1, j), cg[j], opposite_mul)
            } else if i == h - 1 {
                arith.one_sided(pg[j], plane.get(h - 2, j), cg[j], opposite_mul)
            } else {
                arith.two_sided(
                    cg[j],
                    (plane.get(i - 1, j), pg[j]),
                    (plane.get(i + 1, j), ng[j]),
                    opposite_mul,
                )
            };
        }
    }
}
