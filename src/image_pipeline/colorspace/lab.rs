use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::colorspace::types::{ColorMatrix, LabImageData};
use crate::image_pipeline::common::error::{DemosaicError, Result};
use crate::image_pipeline::debayer::RgbImageData;

/// Largest tristimulus value covered by the cube-root table.
pub const CMAXVAL: usize = 0xffff;

/// CIE `(6/29)^3`, where the Lab response switches from linear to cube root.
const EPSILON: f64 = 0.008856;

/// Cube-root response table for the Lab conversion.
///
/// Immutable once built; share it between converters with [`LabTable::shared`].
pub struct LabTable {
    cache: Box<[f64]>,
    threshold: f64,
}

impl LabTable {
    pub fn new() -> Self {
        let cache = (0..=CMAXVAL)
            .map(|k| (k as f64 / CMAXVAL as f64).cbrt())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let threshold = (EPSILON * CMAXVAL as f64) as i32 as f64;
        debug!(entries = cache.len(), threshold, "built Lab cube-root table");
        Self { cache, threshold }
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> Arc<LabTable> {
        static SHARED: OnceLock<Arc<LabTable>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(LabTable::new())).clone()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Table entry for `v`, with the index clamped into `[0, CMAXVAL]`.
    #[inline(always)]
    pub fn lookup(&self, v: f64) -> f64 {
        // `as` saturates negatives and NaN to 0.
        self.cache[(v as usize).min(CMAXVAL)]
    }

    /// The piecewise Lab response `f(v)`.
    #[inline(always)]
    pub fn response(&self, v: f64) -> f64 {
        if v > self.threshold {
            self.lookup(v)
        } else {
            7.787 * v / CMAXVAL as f64 + 16.0 / 116.0
        }
    }
}

impl Default for LabTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LabTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabTable")
            .field("entries", &self.cache.len())
            .field("threshold", &self.threshold)
            .finish()
    }
}

/// Linear RGB rows to fixed-point CIE Lab through a working-profile matrix.
#[derive(Debug, Clone)]
pub struct LabConverter {
    matrix: ColorMatrix,
    table: Arc<LabTable>,
}

impl LabConverter {
    pub fn new(matrix: ColorMatrix, table: Arc<LabTable>) -> Self {
        Self { matrix, table }
    }

    /// Converter over the shared table.
    pub fn with_matrix(matrix: ColorMatrix) -> Self {
        Self::new(matrix, LabTable::shared())
    }

    pub fn matrix(&self) -> &ColorMatrix {
        &self.matrix
    }

    pub fn table(&self) -> &LabTable {
        &self.table
    }

    pub fn shared_table(&self) -> Arc<LabTable> {
        Arc::clone(&self.table)
    }

    /// Convert one row.
    ///
    /// `L* = 300 f(y)` above the threshold and `300 * 903.3 * y / CMAXVAL`
    /// below it, `a* = 32 * 500 (f(x) - f(y))`, `b* = 32 * 200 (f(y) - f(z))`.
    ///
    /// # Panics
    ///
    /// Panics if the six rows differ in length.
    pub fn convert_row(
        &self,
        r: &[u16],
        g: &[u16],
        b: &[u16],
        out_l: &mut [i16],
        out_a: &mut [i16],
        out_b: &mut [i16],
    ) {
        let w = r.len();
        assert!(
            [g.len(), b.len(), out_l.len(), out_a.len(), out_b.len()]
                .iter()
                .all(|&len| len == w),
            "Lab rows must all have length {w}"
        );
        let table = &*self.table;
        for j in 0..w {
            let [x, y, z] = self.matrix.apply(r[j] as f64, g[j] as f64, b[j] as f64);
            let (fx, fy, fz) = (table.response(x), table.response(y), table.response(z));

            out_l[j] = if y > table.threshold {
                (300.0 * fy) as i16
            } else {
                (300.0 * 903.3 * y / CMAXVAL as f64) as i16
            };
            out_a[j] = (32.0 * 500.0 * (fx - fy)) as i16;
            out_b[j] = (32.0 * 200.0 * (fy - fz)) as i16;
        }
    }

    /// Row-parallel conversion of a whole image.
    pub fn convert_image(&self, rgb: &RgbImageData) -> Result<LabImageData> {
        let (w, h) = (rgb.width, rgb.height);
        let expected = w * h;
        for plane in [&rgb.r, &rgb.g, &rgb.b] {
            if plane.len() != expected {
                return Err(DemosaicError::BufferSizeMismatch {
                    expected,
                    got: plane.len(),
                });
            }
        }
        let mut lab = LabImageData::new(w, h);
        if w == 0 {
            return Ok(lab);
        }
        lab.l
            .par_chunks_mut(w)
            .zip(lab.a.par_chunks_mut(w))
            .zip(lab.b.par_chunks_mut(w))
            .enumerate()
            .for_each(|(row, ((l, a), b))| {
                let span = row * w..(row + 1) * w;
                self.convert_row(&rgb.r[span.clone()], &rgb.g[span.clone()], &rgb.b[span], l, a, b);
            });
        Ok(lab)
    }
}
