//! High-level facade crate for the `coffee-ring-*` workspace.
//!
//! This crate provides:
//! - re-exports of the underlying crates,
//! - [`AnalysisParams`] and the end-to-end [`analyze_view`] pipeline
//!   (calibration, center location, radial profile, crop, report),
//! - (feature `image`) helpers for `image::RgbImage` input, the annotated
//!   overlay, the profile chart and artifact writing.
//!
//! ## Quickstart
//!
//! ```no_run
//! use coffee_ring::{analyze_image, load_rgb, save_artifacts, AnalysisParams};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Path::new("drop_01.png");
//! let img = load_rgb(path)?;
//! let analysis = analyze_image(&img, "drop_01.png", &AnalysisParams::default())?;
//! println!(
//!     "center ({}) radius {} px",
//!     analysis.circle.center, analysis.circle.radius
//! );
//! save_artifacts(&img, &analysis, Path::new("out"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `coffee_ring::core`: image views, points, circles, masks, calibration.
//! - `coffee_ring::center`: color mask, contours, enclosing circle, circumcircle.
//! - `coffee_ring::profile`: radial sampler, crops, reports, cache.

pub use coffee_ring_center as center;
pub use coffee_ring_core as core;
pub use coffee_ring_profile as profile;

pub use coffee_ring_center::{CenterOverride, CenterStrategy, ColorThresholdParams};
pub use coffee_ring_core::{CalibrationInput, CalibrationScale, Circle, PixelPoint};
pub use coffee_ring_profile::{ProfileCache, ProfileReport, RgbRadialProfile};

mod analyze;
mod params;

pub use analyze::{analyze_view, analyze_view_cached, AnalyzeError, RingAnalysis};
pub use params::{AnalysisParams, CenterMethod, DEFAULT_RADIUS_SCALE, MAX_RADIUS};

#[cfg(feature = "image")]
mod artifacts;
#[cfg(feature = "image")]
mod image_io;
#[cfg(feature = "image")]
mod overlay;

#[cfg(feature = "image")]
pub use artifacts::save_artifacts;
#[cfg(feature = "image")]
pub use image_io::{
    analyze_image, analyze_rgb_u8, load_rgb, rgb_image_from_slice, rgb_view, to_image,
};
#[cfg(feature = "image")]
pub use overlay::{
    render_channel_panel, render_overlay, render_profile_plot, PLOT_HEIGHT, PLOT_WIDTH,
};
