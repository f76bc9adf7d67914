use thiserror::Error;

use crate::image_pipeline::raw::Channel;

#[derive(Error, Debug)]
pub enum DemosaicError {
    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Buffer size mismatch: expected {expected} samples, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },

    #[error("Invalid preview skip: {0} (must be at least 1)")]
    InvalidPreviewSkip(usize),

    #[error("Invalid {0} multiplier: {1}")]
    InvalidMultiplier(Channel, f64),

    #[error("Unsupported bit depth: {0}")]
    InvalidBitDepth(u32),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, DemosaicError>;
