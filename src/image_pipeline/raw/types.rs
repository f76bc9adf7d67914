//! RAW sensor plane types

use crate::image_pipeline::common::error::{DemosaicError, Result};
use crate::image_pipeline::raw::cfa::{BayerPattern, Channel};

/// Represents decoded RAW image data
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Raw pixel data (single channel Bayer pattern)
    pub data: Vec<u16>,
    /// Actual bits per sample from the sensor (e.g., 12, 14, or 16)
    pub bits_per_sample: u32,
    /// Color filter layout of the sensor
    pub pattern: BayerPattern,
}

impl RawImageData {
    /// Borrow the samples as a plane view.
    pub fn plane(&self) -> Result<RawPlane<'_>> {
        RawPlane::new(&self.data, self.width, self.height, self.pattern)
    }
}

/// Borrowed row-major view of a Bayer mosaic.
///
/// Kernels only ever read through this view; the samples stay owned by the caller.
/// Coordinates are checked with `debug_assert!` and by slice indexing.
#[derive(Debug, Clone, Copy)]
pub struct RawPlane<'a> {
    data: &'a [u16],
    width: usize,
    height: usize,
    pattern: BayerPattern,
}

impl<'a> RawPlane<'a> {
    pub fn new(
        data: &'a [u16],
        width: usize,
        height: usize,
        pattern: BayerPattern,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DemosaicError::InvalidDimensions(width, height));
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(DemosaicError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            pattern,
        })
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn pattern(&self) -> BayerPattern {
        self.pattern
    }

    /// Sample at row `i`, column `j`, widened for signed arithmetic.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        debug_assert!(
            i < self.height && j < self.width,
            "({i}, {j}) outside {}x{} plane",
            self.width,
            self.height
        );
        self.data[i * self.width + j] as i32
    }

    #[inline]
    pub fn row(&self, i: usize) -> &'a [u16] {
        &self.data[i * self.width..(i + 1) * self.width]
    }

    #[inline(always)]
    pub fn color_at(&self, i: usize, j: usize) -> Channel {
        self.pattern.color_at(i, j)
    }

    #[inline(always)]
    pub fn is_red(&self, i: usize, j: usize) -> bool {
        self.pattern.is_red(i, j)
    }

    #[inline(always)]
    pub fn is_green(&self, i: usize, j: usize) -> bool {
        self.pattern.is_green(i, j)
    }

    #[inline(always)]
    pub fn is_blue(&self, i: usize, j: usize) -> bool {
        self.pattern.is_blue(i, j)
    }
}
