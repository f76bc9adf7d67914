//! Debayering module for converting Bayer pattern RAW images to RGB
//!
//! Row kernels for the green and red/blue passes, and a plane driver that
//! runs them across rows on the rayon pool.

pub mod cpu_debayer;
pub mod green;
pub mod red_blue;
pub mod types;

pub use cpu_debayer::{CpuDebayer, select_green_row};
pub use green::interpolate_row_g;
pub use red_blue::{interpolate_row_rb, interpolate_row_rb_mul};
pub use types::{RgbImageData, RowPolarity, Subsample, WhiteBalance};
