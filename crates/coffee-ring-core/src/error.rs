use crate::PixelPoint;

/// Errors produced by calibration and point geometry.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("calibration points coincide at ({point})")]
    DegenerateInput { point: PixelPoint },

    #[error("reference distance must be finite and positive (got {0})")]
    InvalidDistance(f64),

    #[error("points are collinear, no unique circumcircle")]
    CollinearPoints,

    #[error("invalid coordinate `{input}`: {reason}")]
    InvalidCoordinate { input: String, reason: String },
}
