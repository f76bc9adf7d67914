//! Pipeline conversions module
//!
//! Orchestration from raw Bayer mosaics to demosaiced RGB, Lab and YIQ.

mod raw_to_lab;

#[cfg(test)]
mod tests;

pub use raw_to_lab::RawToLabPipeline;
