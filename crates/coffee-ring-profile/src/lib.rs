//! Radial intensity profiles of coffee-ring images.
//!
//! Given a ring center and radius, [`sample_rgb`] reduces each concentric ring
//! to the mean and population standard deviation of R, G and B. Rings that
//! cross the image border keep the arc sampled before the first exit and are
//! listed as [`OutOfBounds`] warnings.
//!
//! The crate also provides the circle crop used for visual inspection, the
//! tabular report with CSV/JSON writers, and an explicit [`ProfileCache`].

mod cache;
mod crop;
mod report;
mod sampler;
mod stats;

pub use cache::{image_digest, ProfileCache, ProfileKey, DEFAULT_CACHE_ENTRIES};
pub use crop::{channel_plane, crop_rect, crop_to_circle};
pub use report::{profile_rows, CircleRecord, ProfileReport, ProfileRow, ReportError};
pub use sampler::{
    radial_profile_direction, sample, sample_rgb, OutOfBounds, RadialProfile, RgbRadialProfile,
    ANGLE_STEPS,
};
pub use stats::mean_stddev;
