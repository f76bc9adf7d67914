use rayon::prelude::*;
use tracing::{debug, info};

use crate::image_pipeline::common::clip_f64;
use crate::image_pipeline::common::error::{DemosaicError, Result};
use crate::image_pipeline::config::{GreenSelection, PipelineConfig, validate_preview_skip};
use crate::image_pipeline::debayer::green::interpolate_row_g;
use crate::image_pipeline::debayer::red_blue::{interpolate_row_rb, interpolate_row_rb_mul};
use crate::image_pipeline::debayer::types::{RgbImageData, Subsample, WhiteBalance};
use crate::image_pipeline::raw::RawPlane;

/// Row-parallel demosaic of a whole Bayer plane.
///
/// The green pass completes over every row before the red/blue pass reads
/// its three-row windows. Rows run on whichever rayon pool is current.
#[derive(Debug, Clone)]
pub struct CpuDebayer {
    white_balance: WhiteBalance,
    green_selection: GreenSelection,
    preview_skip: Option<usize>,
}

impl CpuDebayer {
    pub fn new(
        white_balance: WhiteBalance,
        green_selection: GreenSelection,
        preview_skip: Option<usize>,
    ) -> Result<Self> {
        white_balance.validate()?;
        validate_preview_skip(preview_skip)?;
        Ok(Self {
            white_balance,
            green_selection,
            preview_skip,
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Self::new(config.white_balance, config.green_selection, config.preview_skip)
    }

    pub fn process(&self, plane: &RawPlane<'_>) -> Result<RgbImageData> {
        let (width, height) = (plane.width(), plane.height());
        if width < 3 || height < 3 {
            return Err(DemosaicError::InvalidDimensions(width, height));
        }
        info!(
            width,
            height,
            pattern = %plane.pattern(),
            "Starting CPU debayering"
        );

        match self.preview_skip {
            Some(skip) if skip > 1 => Ok(self.preview(plane, skip)),
            _ => Ok(self.full(plane)),
        }
    }

    fn full(&self, plane: &RawPlane<'_>) -> RgbImageData {
        let (w, h) = (plane.width(), plane.height());
        let wb = self.white_balance;
        let scaled = !wb.is_identity();

        let green = {
            let _span = tracing::debug_span!("green_pass").entered();
            self.green_plane(plane)
        };

        let mut rgb = RgbImageData::new(w, h);
        {
            let _span = tracing::debug_span!("red_blue_pass", scaled).entered();
            rgb.r
                .par_chunks_mut(w)
                .zip(rgb.b.par_chunks_mut(w))
                .enumerate()
                .for_each(|(i, (r, b))| {
                    let pg = &green[i.saturating_sub(1) * w..][..w];
                    let cg = &green[i * w..][..w];
                    let ng = &green[(i + 1).min(h - 1) * w..][..w];
                    if scaled {
                        interpolate_row_rb_mul(plane, r, b, pg, cg, ng, i, &wb, Subsample::full(w));
                    } else {
                        interpolate_row_rb(plane, r, b, pg, cg, ng, i);
                    }
                });
        }

        rgb.g = if scaled {
            green.par_iter().map(|&g| clip_f64(wb.g_mul * g as f64)).collect()
        } else {
            green
        };
        debug!(width = w, height = h, "full resolution debayer complete");
        rgb
    }

    /// Every `skip`-th row and column, through the multiplied kernel.
    fn preview(&self, plane: &RawPlane<'_>, skip: usize) -> RgbImageData {
        let (w, h) = (plane.width(), plane.height());
        let wb = self.white_balance;
        let selection = self.green_selection;
        let sub = Subsample::decimated(w, skip);
        let mut rgb = RgbImageData::new(sub.width, h.div_ceil(skip));
        let out_w = rgb.width;

        let _span = tracing::debug_span!("preview_pass", skip, out_w, out_h = rgb.height).entered();
        rgb.r
            .par_chunks_mut(out_w)
            .zip(rgb.g.par_chunks_mut(out_w))
            .zip(rgb.b.par_chunks_mut(out_w))
            .enumerate()
            .for_each_init(
                || PreviewScratch::new(w),
                |scratch, (k, ((r, g), b))| {
                    let i = k * skip;
                    let rows = [i.saturating_sub(1), i, (i + 1).min(h - 1)];
                    for (slot, &row) in rows.iter().enumerate() {
                        green_row(
                            plane,
                            row,
                            selection,
                            &mut scratch.gh,
                            &mut scratch.gv,
                            &mut scratch.green[slot],
                        );
                    }
                    let [pg, cg, ng] = &scratch.green;
                    interpolate_row_rb_mul(plane, r, b, pg, cg, ng, i, &wb, sub);
                    for (jx, j) in sub.columns() {
                        g[jx] = clip_f64(wb.g_mul * cg[j] as f64);
                    }
                },
            );
        debug!(width = rgb.width, height = rgb.height, "preview debayer complete");
        rgb
    }

    /// Selected green for every site of the plane.
    fn green_plane(&self, plane: &RawPlane<'_>) -> Vec<u16> {
        let w = plane.width();
        let selection = self.green_selection;
        let mut green = vec![0u16; w * plane.height()];
        green
            .par_chunks_mut(w)
            .enumerate()
            .for_each_init(
                || (vec![0u16; w], vec![0u16; w]),
                |(gh, gv), (i, row)| green_row(plane, i, selection, gh, gv, row),
            );
        green
    }
}

struct PreviewScratch {
    gh: Vec<u16>,
    gv: Vec<u16>,
    green: [Vec<u16>; 3],
}

impl PreviewScratch {
    fn new(w: usize) -> Self {
        Self {
            gh: vec![0; w],
            gv: vec![0; w],
            green: [vec![0; w], vec![0; w], vec![0; w]],
        }
    }
}

fn green_row(
    plane: &RawPlane<'_>,
    i: usize,
    selection: GreenSelection,
    gh: &mut [u16],
    gv: &mut [u16],
    out: &mut [u16],
) {
    interpolate_row_g(plane, gh, gv, i);
    select_green_row(plane, i, gh, gv, selection, out);
}

/// Pick the current-row green from the two directional estimates.
pub fn select_green_row(
    plane: &RawPlane<'_>,
    i: usize,
    gh: &[u16],
    gv: &[u16],
    selection: GreenSelection,
    out: &mut [u16],
) {
    let w = plane.width();
    match selection {
        GreenSelection::Horizontal => out[..w].copy_from_slice(&gh[..w]),
        GreenSelection::Vertical => out[..w].copy_from_slice(&gv[..w]),
        GreenSelection::Average => {
            for j in 0..w {
                out[j] = average(gh[j], gv[j]);
            }
        }
        GreenSelection::LowerGradient => {
            for j in 0..w {
                out[j] = if gh[j] == gv[j] {
                    gh[j]
                } else {
                    let (dh, dv) = gradients(plane, i, j);
                    if dh < dv {
                        gh[j]
                    } else if dv < dh {
                        gv[j]
                    } else {
                        average(gh[j], gv[j])
                    }
                };
            }
        }
    }
}

#[inline(always)]
fn average(a: u16, b: u16) -> u16 {
    ((a as u32 + b as u32) / 2) as u16
}

/// Horizontal and vertical gradient magnitudes at `(i, j)`, first difference
/// of the direct neighbors plus the same-color Laplacian. Edges replicate.
#[inline]
fn gradients(plane: &RawPlane<'_>, i: usize, j: usize) -> (i32, i32) {
    let (w, h) = (plane.width() as isize, plane.height() as isize);
    let at = |dy: isize, dx: isize| {
        let y = (i as isize + dy).clamp(0, h - 1) as usize;
        let x = (j as isize + dx).clamp(0, w - 1) as usize;
        plane.get(y, x)
    };
    let center = 2 * at(0, 0);
    let dh = (at(0, -1) - at(0, 1)).abs() + (center - at(0, -2) - at(0, 2)).abs();
    let dv = (at(-1, 0) - at(1, 0)).abs() + (center - at(-2, 0) - at(2, 0)).abs();
    (dh, dv)
}
