//! Types for debayering operations

use crate::image_pipeline::common::error::{DemosaicError, Result};
use crate::image_pipeline::raw::{Channel, RawPlane};

/// Planar RGB image data after debayering
#[derive(Debug, Clone)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    pub r: Vec<u16>,
    pub g: Vec<u16>,
    pub b: Vec<u16>,
}

impl RgbImageData {
    pub fn new(width: usize, height: usize) -> Self {
        let npix = width * height;
        Self {
            width,
            height,
            r: vec![0; npix],
            g: vec![0; npix],
            b: vec![0; npix],
        }
    }

    /// `(r, g, b)` at pixel `(row, col)`.
    pub fn pixel(&self, row: usize, col: usize) -> (u16, u16, u16) {
        let idx = row * self.width + col;
        (self.r[idx], self.g[idx], self.b[idx])
    }
}

/// Per-channel white balance scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiteBalance {
    pub r_mul: f64,
    pub g_mul: f64,
    pub b_mul: f64,
}

impl Default for WhiteBalance {
    fn default() -> Self {
        Self {
            r_mul: 1.0,
            g_mul: 1.0,
            b_mul: 1.0,
        }
    }
}

impl WhiteBalance {
    pub fn new(r_mul: f64, g_mul: f64, b_mul: f64) -> Self {
        Self { r_mul, g_mul, b_mul }
    }

    #[inline(always)]
    pub fn mul(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Red => self.r_mul,
            Channel::Green => self.g_mul,
            Channel::Blue => self.b_mul,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.r_mul == 1.0 && self.g_mul == 1.0 && self.b_mul == 1.0
    }

    /// Every multiplier must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        for channel in [Channel::Red, Channel::Green, Channel::Blue] {
            let mul = self.mul(channel);
            if !mul.is_finite() || mul <= 0.0 {
                return Err(DemosaicError::InvalidMultiplier(channel, mul));
            }
        }
        Ok(())
    }
}

/// Column window of a red/blue pass: `width` samples starting at raw
/// column `x1`, one every `skip` raw columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subsample {
    pub x1: usize,
    pub width: usize,
    pub skip: usize,
}

impl Subsample {
    /// Every column of a row of `raw_width` samples.
    pub fn full(raw_width: usize) -> Self {
        Self {
            x1: 0,
            width: raw_width,
            skip: 1,
        }
    }

    /// Every `skip`-th column of a row of `raw_width` samples, starting at column 0.
    pub fn decimated(raw_width: usize, skip: usize) -> Self {
        Self {
            x1: 0,
            width: raw_width.div_ceil(skip.max(1)),
            skip,
        }
    }

    pub fn is_valid_for(&self, raw_width: usize) -> bool {
        self.skip >= 1
            && self.width >= 1
            && self.x1 < raw_width
            && (self.width - 1)
                .checked_mul(self.skip)
                .and_then(|span| span.checked_add(self.x1))
                .is_some_and(|last| last < raw_width)
    }

    /// `(output index, raw column)` pairs.
    #[inline]
    pub fn columns(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (x1, skip) = (self.x1, self.skip);
        (0..self.width).map(move |jx| (jx, x1 + jx * skip))
    }
}

/// Which of red or blue is the native (non-green) color of a sensor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPolarity {
    /// RGRG or GRGR row.
    RedNative,
    /// BGBG or GBGB row.
    BlueNative,
}

impl RowPolarity {
    pub fn of_row(plane: &RawPlane<'_>, i: usize) -> Self {
        if plane.is_red(i, 0) || plane.is_red(i, 1) {
            Self::RedNative
        } else {
            Self::BlueNative
        }
    }

    #[inline(always)]
    pub fn native(self) -> Channel {
        match self {
            Self::RedNative => Channel::Red,
            Self::BlueNative => Channel::Blue,
        }
    }

    #[inline(always)]
    pub fn opposite(self) -> Channel {
        match self {
            Self::RedNative => Channel::Blue,
            Self::BlueNative => Channel::Red,
        }
    }
}
