use std::fmt;
use std::str::FromStr;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Integer pixel coordinates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: PixelPoint) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn to_point2(self) -> Point2<f64> {
        Point2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// Parses the `"x, y"` text form (whitespace around either number is ignored).
impl FromStr for PixelPoint {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| GeometryError::InvalidCoordinate {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let mut parts = s.split(',');
        let (Some(xs), Some(ys), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected two comma-separated integers"));
        };
        let x = xs
            .trim()
            .parse::<i32>()
            .map_err(|e| invalid(&format!("x: {e}")))?;
        let y = ys
            .trim()
            .parse::<i32>()
            .map_err(|e| invalid(&format!("y: {e}")))?;
        Ok(Self { x, y })
    }
}

/// Ring circle in integer pixel units. The center is not required to lie
/// inside the image.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Circle {
    pub center: PixelPoint,
    pub radius: u32,
}

impl Circle {
    pub const fn new(center: PixelPoint, radius: u32) -> Self {
        Self { center, radius }
    }

    pub fn with_center(self, center: PixelPoint) -> Self {
        Self { center, ..self }
    }

    pub fn with_radius(self, radius: u32) -> Self {
        Self { radius, ..self }
    }

    /// Radius multiplied by `factor`, truncated. Negative and NaN products give
    /// 0, products beyond `u32::MAX` saturate; callers bound `factor` first.
    pub fn scaled(self, factor: f64) -> Self {
        let r = (f64::from(self.radius) * factor).max(0.0);
        Self {
            radius: r as u32,
            ..self
        }
    }
}

/// Sub-pixel circle estimate produced by a center strategy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    pub center: Point2<f64>,
    pub radius: f64,
}

impl CircleFit {
    pub fn contains(&self, p: Point2<f64>, eps: f64) -> bool {
        (p - self.center).norm() <= self.radius + eps
    }

    /// Integer circle; each component is truncated toward zero.
    pub fn to_circle(&self) -> Circle {
        Circle {
            center: PixelPoint {
                x: self.center.x as i32,
                y: self.center.y as i32,
            },
            radius: self.radius.max(0.0) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_point_with_spaces() {
        let p: PixelPoint = " 12 ,  -7 ".parse().unwrap();
        assert_eq!(p, PixelPoint::new(12, -7));
    }

    #[test]
    fn rejects_malformed_point() {
        for input in ["", "12", "1,2,3", "a, 2", "1.5, 2"] {
            let err = input.parse::<PixelPoint>().unwrap_err();
            assert!(
                matches!(err, GeometryError::InvalidCoordinate { .. }),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn display_round_trips_text_form() {
        let p = PixelPoint::new(320, 240);
        assert_eq!(p.to_string().parse::<PixelPoint>().unwrap(), p);
    }

    #[test]
    fn circle_fit_truncates_toward_zero() {
        let fit = CircleFit {
            center: Point2::new(100.9, -3.7),
            radius: 49.99,
        };
        assert_eq!(fit.to_circle(), Circle::new(PixelPoint::new(100, -3), 49));
    }

    #[test]
    fn scaled_radius_truncates() {
        let c = Circle::new(PixelPoint::new(0, 0), 41);
        assert_eq!(c.scaled(1.2).radius, 49);
    }

    #[test]
    fn point_and_circle_json_shape() {
        let p = PixelPoint::new(-3, 8);
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"x":-3,"y":8}"#);
        let c: Circle =
            serde_json::from_str(r#"{"center": {"x": 5, "y": 6}, "radius": 9}"#).unwrap();
        assert_eq!(c, Circle::new(PixelPoint::new(5, 6), 9));
        assert!(serde_json::from_str::<Circle>(r#"{"center": {"x": 5, "y": 6}, "radius": -1}"#)
            .is_err());
    }
}
