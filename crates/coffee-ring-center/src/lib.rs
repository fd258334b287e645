//! Ring center location.
//!
//! Two interchangeable strategies produce the ring `Circle`:
//! - the minimum enclosing circle of the largest region of a binary mask
//!   (typically built with [`color_range_mask`] around a seed pixel),
//! - the circumcircle of three points picked on the ring.
//!
//! Both are dispatched through [`locate_center`]; a [`CenterOverride`] can
//! then move the center or resize the radius.

mod circumcircle;
mod contour;
mod enclosing;
mod error;
mod locator;
mod threshold;

pub use circumcircle::circumcircle;
pub use contour::{find_external_contours, largest_contour, Contour};
pub use enclosing::min_enclosing_circle;
pub use error::CenterError;
pub use locator::{
    center_from_3point, center_from_mask, fit_center, fit_from_mask, locate_center,
    CenterOverride, CenterStrategy,
};
pub use threshold::{color_range_mask, ColorThresholdParams, MAX_TOLERANCE, MIN_TOLERANCE};
