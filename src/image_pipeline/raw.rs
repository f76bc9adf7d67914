//! RAW sensor plane module
//!
//! Owned and borrowed views of a single-channel Bayer mosaic plus the CFA layout.

pub mod cfa;
pub mod types;

pub use cfa::{BayerPattern, Channel};
pub use types::{RawImageData, RawPlane};
