//! Common utilities module
//!
//! Error type, sample clamping, worker pool and pass timing shared across the pipeline.

pub mod clip;
pub mod error;
pub mod pool;
pub mod timing;

pub use clip::{MAXVAL, clip, clip_bits, clip_f64, max_value};
pub use error::{DemosaicError, Result};
pub use pool::WorkerPool;
pub use timing::{PipelineTimings, StepTiming, Timer};
