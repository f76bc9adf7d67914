//! Image processing pipeline module
//!
//! Bayer demosaicing and colorspace conversion, split into raw sample access,
//! the row kernels and their drivers, colorspace transforms and the
//! orchestration that ties them together.

pub mod colorspace;
pub mod common;
pub mod config;
pub mod conversions;
pub mod debayer;
pub mod raw;

pub use common::{DemosaicError, PipelineTimings, Result, WorkerPool};

pub use config::{GreenSelection, PipelineConfig, PipelineConfigBuilder};

pub use raw::{BayerPattern, Channel, RawImageData, RawPlane};

pub use debayer::{CpuDebayer, RgbImageData, Subsample, WhiteBalance};

pub use colorspace::{ColorMatrix, LabConverter, LabImageData, LabTable, YiqImageData};

pub use conversions::RawToLabPipeline;
