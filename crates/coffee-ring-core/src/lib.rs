//! Core types for coffee-ring deposit analysis.
//!
//! Image views, integer pixel geometry, binary masks and the two-point
//! distance calibration. The crate has no I/O and no dependency on a concrete
//! image library.

mod calibration;
mod error;
mod geometry;
mod image;
mod logger;

pub use calibration::{compute_scale, CalibrationInput, CalibrationScale};
pub use error::GeometryError;
pub use geometry::{Circle, CircleFit, PixelPoint};
pub use image::{Channel, Mask, RgbImage, RgbImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_format, init_with_level, level_from_str, LineFormat};
