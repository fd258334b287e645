use coffee_ring_core::{Circle, CircleFit, Mask, PixelPoint};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::circumcircle::circumcircle;
use crate::contour::{find_external_contours, largest_contour};
use crate::enclosing::min_enclosing_circle;
use crate::CenterError;

/// How the ring circle is obtained.
#[derive(Clone, Debug, PartialEq)]
pub enum CenterStrategy {
    /// Minimum enclosing circle of the largest region in a mask.
    Mask(Mask),
    /// Circumcircle of three points picked on the ring.
    ThreePoint(PixelPoint, PixelPoint, PixelPoint),
}

/// Sub-pixel circle from the largest mask region.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(mask), fields(width = mask.width, height = mask.height))
)]
pub fn fit_from_mask(mask: &Mask) -> Result<CircleFit, CenterError> {
    let contours = find_external_contours(mask);
    let largest = largest_contour(&contours).ok_or(CenterError::NoContourFound)?;
    log::debug!(
        "mask: {} contours, largest area {:.1} with {} boundary px",
        contours.len(),
        largest.area(),
        largest.points.len()
    );
    min_enclosing_circle(&largest.points).ok_or(CenterError::NoContourFound)
}

/// Ring circle from the minimum enclosing circle of the largest mask region.
pub fn center_from_mask(mask: &Mask) -> Result<Circle, CenterError> {
    Ok(fit_from_mask(mask)?.to_circle())
}

/// Ring circle through three picked points.
pub fn center_from_3point(
    p1: PixelPoint,
    p2: PixelPoint,
    p3: PixelPoint,
) -> Result<Circle, CenterError> {
    Ok(circumcircle(p1, p2, p3)?.to_circle())
}

/// Sub-pixel circle for either strategy.
pub fn fit_center(strategy: &CenterStrategy) -> Result<CircleFit, CenterError> {
    match strategy {
        CenterStrategy::Mask(mask) => fit_from_mask(mask),
        CenterStrategy::ThreePoint(p1, p2, p3) => Ok(circumcircle(*p1, *p2, *p3)?),
    }
}

/// Single entry point for center location.
pub fn locate_center(strategy: &CenterStrategy) -> Result<Circle, CenterError> {
    let fit = fit_center(strategy)?;
    let circle = fit.to_circle();
    log::info!(
        "ring circle: center ({:.2}, {:.2}) r {:.2} -> ({}) r {}",
        fit.center.x,
        fit.center.y,
        fit.radius,
        circle.center,
        circle.radius
    );
    Ok(circle)
}

/// Manual adjustment applied after a strategy ran.
///
/// The replacement center is not checked against the image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterOverride {
    pub center: Option<PixelPoint>,
    /// Explicit sampling radius; wins over `radius_scale`.
    pub radius: Option<u32>,
    /// Factor applied to the located radius.
    pub radius_scale: f64,
}

impl Default for CenterOverride {
    fn default() -> Self {
        Self {
            center: None,
            radius: None,
            radius_scale: 1.0,
        }
    }
}

impl CenterOverride {
    pub fn apply(&self, circle: Circle) -> Circle {
        let mut out = match self.radius {
            Some(r) => circle.with_radius(r),
            None => circle.scaled(self.radius_scale),
        };
        if let Some(center) = self.center {
            out = out.with_center(center);
        }
        out
    }
}
