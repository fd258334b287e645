//! Three-point circumcircle.

use coffee_ring_core::{CircleFit, GeometryError, PixelPoint};
use nalgebra::Point2;

/// Circle through three picked points.
///
/// The determinant and numerators are evaluated exactly in `i128` on the
/// integer inputs, so collinear picks are rejected before any division and the
/// full `i32` coordinate range is accepted.
pub fn circumcircle(
    p1: PixelPoint,
    p2: PixelPoint,
    p3: PixelPoint,
) -> Result<CircleFit, GeometryError> {
    let (x1, y1) = (i128::from(p1.x), i128::from(p1.y));
    let (x2, y2) = (i128::from(p2.x), i128::from(p2.y));
    let (x3, y3) = (i128::from(p3.x), i128::from(p3.y));

    let d = 2 * (x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2));
    if d == 0 {
        return Err(GeometryError::CollinearPoints);
    }

    let s1 = x1 * x1 + y1 * y1;
    let s2 = x2 * x2 + y2 * y2;
    let s3 = x3 * x3 + y3 * y3;
    let d = d as f64;
    let ux = (s1 * (y2 - y3) + s2 * (y3 - y1) + s3 * (y1 - y2)) as f64 / d;
    let uy = (s1 * (x3 - x2) + s2 * (x1 - x3) + s3 * (x2 - x1)) as f64 / d;

    let center = Point2::new(ux, uy);
    let radius = (p1.to_point2() - center).norm();
    Ok(CircleFit { center, radius })
}
