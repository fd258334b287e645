//! Minimum enclosing circle of a pixel point set.

use coffee_ring_core::{CircleFit, PixelPoint};
use nalgebra::Point2;

const EPS: f64 = 1e-7;

/// Convex hull (Andrew's monotone chain), counter-clockwise, no collinear points.
fn convex_hull(points: &[PixelPoint]) -> Vec<PixelPoint> {
    let mut pts = points.to_vec();
    pts.sort_unstable_by_key(|p| (p.x, p.y));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    fn cross(o: PixelPoint, a: PixelPoint, b: PixelPoint) -> i64 {
        (i64::from(a.x) - i64::from(o.x)) * (i64::from(b.y) - i64::from(o.y))
            - (i64::from(a.y) - i64::from(o.y)) * (i64::from(b.x) - i64::from(o.x))
    }

    let mut hull: Vec<PixelPoint> = Vec::with_capacity(2 * pts.len());
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

fn circle_from_two(a: Point2<f64>, b: Point2<f64>) -> CircleFit {
    let center = Point2::from((a.coords + b.coords) * 0.5);
    CircleFit {
        center,
        radius: (a - center).norm(),
    }
}

/// Circumcircle through three points, `None` when they are collinear.
pub(crate) fn circle_from_three(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
) -> Option<CircleFit> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d == 0.0 {
        return None;
    }
    let sa = a.x * a.x + a.y * a.y;
    let sb = b.x * b.x + b.y * b.y;
    let sc = c.x * c.x + c.y * c.y;
    let ux = (sa * (b.y - c.y) + sb * (c.y - a.y) + sc * (a.y - b.y)) / d;
    let uy = (sa * (c.x - b.x) + sb * (a.x - c.x) + sc * (b.x - a.x)) / d;
    let center = Point2::new(ux, uy);
    Some(CircleFit {
        center,
        radius: (a - center).norm(),
    })
}

/// Smallest circle containing every point of `points`.
///
/// The incremental construction runs over the convex hull only, which keeps
/// long contour traces cheap. Returns `None` for an empty set.
pub fn min_enclosing_circle(points: &[PixelPoint]) -> Option<CircleFit> {
    let hull: Vec<Point2<f64>> = convex_hull(points)
        .into_iter()
        .map(PixelPoint::to_point2)
        .collect();
    let first = *hull.first()?;

    let mut circle = CircleFit {
        center: first,
        radius: 0.0,
    };
    for i in 1..hull.len() {
        if circle.contains(hull[i], EPS) {
            continue;
        }
        circle = CircleFit {
            center: hull[i],
            radius: 0.0,
        };
        for j in 0..i {
            if circle.contains(hull[j], EPS) {
                continue;
            }
            circle = circle_from_two(hull[i], hull[j]);
            for k in 0..j {
                if circle.contains(hull[k], EPS) {
                    continue;
                }
                // Three hull points are never collinear here; fall back to the
                // widest pair if rounding says otherwise.
                circle = circle_from_three(hull[i], hull[j], hull[k]).unwrap_or_else(|| {
                    let pairs = [(i, j), (i, k), (j, k)];
                    pairs
                        .iter()
                        .map(|&(p, q)| circle_from_two(hull[p], hull[q]))
                        .fold(circle, |best, c| if c.radius > best.radius { c } else { best })
                });
            }
        }
    }
    Some(circle)
}
