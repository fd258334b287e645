use coffee_ring_core::GeometryError;

/// Errors returned by the center locator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CenterError {
    #[error("mask has no foreground pixels, no contour found")]
    NoContourFound,
    #[error("color tolerance must be within 1..=50 (got {0})")]
    InvalidTolerance(u8),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
