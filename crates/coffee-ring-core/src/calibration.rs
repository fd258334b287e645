//! Pixel-to-physical distance calibration from two reference points.

use serde::{Deserialize, Serialize};

use crate::{GeometryError, PixelPoint};

/// Physical length (millimetres) represented by one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalibrationScale(f64);

impl CalibrationScale {
    pub fn mm_per_px(self) -> f64 {
        self.0
    }

    pub fn to_physical(self, px: f64) -> f64 {
        px * self.0
    }

    pub fn to_pixels(self, length: f64) -> f64 {
        length / self.0
    }
}

/// Two reference points with a known physical separation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationInput {
    pub p1: PixelPoint,
    pub p2: PixelPoint,
    /// Separation of `p1` and `p2` in millimetres.
    pub real_distance: f64,
}

impl CalibrationInput {
    /// Default reference used when nothing was picked: one third and one half
    /// of the image extent, 8 mm apart.
    pub fn default_for(width: usize, height: usize) -> Self {
        Self {
            p1: PixelPoint::new((width / 3) as i32, (height / 3) as i32),
            p2: PixelPoint::new((width / 2) as i32, (height / 2) as i32),
            real_distance: 8.0,
        }
    }

    pub fn scale(&self) -> Result<CalibrationScale, GeometryError> {
        compute_scale(self.p1, self.p2, self.real_distance)
    }
}

/// `real_distance / |p2 - p1|`.
pub fn compute_scale(
    p1: PixelPoint,
    p2: PixelPoint,
    real_distance: f64,
) -> Result<CalibrationScale, GeometryError> {
    if p1 == p2 {
        return Err(GeometryError::DegenerateInput { point: p1 });
    }
    if !real_distance.is_finite() || real_distance <= 0.0 {
        return Err(GeometryError::InvalidDistance(real_distance));
    }
    let d = p1.distance(p2);
    let scale = real_distance / d;
    log::debug!("calibration: {d:.3} px <-> {real_distance} mm, {scale:.6} mm/px");
    Ok(CalibrationScale(scale))
}
