//! Demosaic pipeline configuration types

use crate::image_pipeline::colorspace::ColorMatrix;
use crate::image_pipeline::common::error::{DemosaicError, Result};
use crate::image_pipeline::debayer::WhiteBalance;

/// How the per-row green is chosen from the horizontal and vertical estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreenSelection {
    Horizontal,
    Vertical,
    /// Mean of both estimates
    Average,
    /// Estimate along the axis with the smaller raw gradient, mean on ties
    #[default]
    LowerGradient,
}

/// Configuration for RAW to Lab conversion
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Per-channel white balance applied during red/blue reconstruction
    pub white_balance: WhiteBalance,
    pub green_selection: GreenSelection,
    /// Emit a preview decimated by this factor in both directions
    pub preview_skip: Option<usize>,
    /// Worker threads; `None` uses the global rayon pool
    pub threads: Option<usize>,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
    pub max_dimension: Option<usize>,
    /// Linear RGB to XYZ matrix of the working profile
    pub color_matrix: ColorMatrix,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            white_balance: WhiteBalance::default(),
            green_selection: GreenSelection::default(),
            preview_skip: None,
            threads: None,
            validate_dimensions: true,
            max_dimension: Some(50000),
            color_matrix: ColorMatrix::srgb_d65(),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.white_balance.validate()?;
        validate_preview_skip(self.preview_skip)
    }
}

/// A preview must advance at least one raw column per output sample.
pub(crate) fn validate_preview_skip(skip: Option<usize>) -> Result<()> {
    match skip {
        Some(0) => Err(DemosaicError::InvalidPreviewSkip(0)),
        _ => Ok(()),
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    white_balance: Option<WhiteBalance>,
    green_selection: Option<GreenSelection>,
    preview_skip: Option<Option<usize>>,
    threads: Option<Option<usize>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    color_matrix: Option<ColorMatrix>,
}

impl PipelineConfigBuilder {
    pub fn white_balance(mut self, white_balance: WhiteBalance) -> Self {
        self.white_balance = Some(white_balance);
        self
    }

    pub fn green_selection(mut self, selection: GreenSelection) -> Self {
        self.green_selection = Some(selection);
        self
    }

    pub fn preview_skip(mut self, skip: Option<usize>) -> Self {
        self.preview_skip = Some(skip);
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn color_matrix(mut self, matrix: ColorMatrix) -> Self {
        self.color_matrix = Some(matrix);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            white_balance: self.white_balance.unwrap_or(default.white_balance),
            green_selection: self.green_selection.unwrap_or(default.green_selection),
            preview_skip: self.preview_skip.unwrap_or(default.preview_skip),
            threads: self.threads.unwrap_or(default.threads),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            color_matrix: self.color_matrix.unwrap_or(default.color_matrix),
        }
    }
}
