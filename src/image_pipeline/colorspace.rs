//! Colorspace conversion module
//!
//! Row transforms from demosaiced linear RGB into YIQ and fixed-point CIE Lab.

pub mod lab;
pub mod types;
pub mod yiq;

pub use lab::{CMAXVAL, LabConverter, LabTable};
pub use types::{ColorMatrix, D65_WHITE, LabImageData, SRGB_D65_TO_XYZ, YiqImageData};
pub use yiq::{convert_row_to_rgb, convert_row_to_yiq, rgb_to_yiq_image, yiq_to_rgb_image};
