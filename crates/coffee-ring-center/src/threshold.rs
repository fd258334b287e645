//! Color-range masking around a seed pixel.

use coffee_ring_core::{GeometryError, Mask, PixelPoint, RgbImageView};
use serde::{Deserialize, Serialize};

use crate::CenterError;

pub const MIN_TOLERANCE: u8 = 1;
pub const MAX_TOLERANCE: u8 = 50;

/// Settings for the seed-color threshold mask.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorThresholdParams {
    /// Pixel whose color defines the region; `None` means the image center.
    pub seed: Option<PixelPoint>,
    /// Accepted deviation per channel, 1..=50.
    pub tolerance: u8,
}

impl Default for ColorThresholdParams {
    fn default() -> Self {
        Self {
            seed: None,
            tolerance: 20,
        }
    }
}

impl ColorThresholdParams {
    pub fn seed_for(&self, img: &RgbImageView<'_>) -> PixelPoint {
        self.seed.unwrap_or(PixelPoint::new(
            (img.width / 2) as i32,
            (img.height / 2) as i32,
        ))
    }

    pub fn build_mask(&self, img: &RgbImageView<'_>) -> Result<Mask, CenterError> {
        color_range_mask(img, self.seed_for(img), self.tolerance)
    }
}

/// Mark every pixel whose three channels all lie within `seed_color ± tolerance`.
///
/// Range bounds saturate at 0 and 255.
pub fn color_range_mask(
    img: &RgbImageView<'_>,
    seed: PixelPoint,
    tolerance: u8,
) -> Result<Mask, CenterError> {
    if !(MIN_TOLERANCE..=MAX_TOLERANCE).contains(&tolerance) {
        return Err(CenterError::InvalidTolerance(tolerance));
    }
    if !img.contains(i64::from(seed.x), i64::from(seed.y)) {
        return Err(GeometryError::InvalidCoordinate {
            input: seed.to_string(),
            reason: format!("seed outside {}x{} image", img.width, img.height),
        }
        .into());
    }

    let color = img.pixel(seed.x as usize, seed.y as usize);
    let lower = color.map(|c| c.saturating_sub(tolerance));
    let upper = color.map(|c| c.saturating_add(tolerance));

    let mask = Mask::from_fn(img.width, img.height, |x, y| {
        let px = img.pixel(x, y);
        (0..3).all(|c| px[c] >= lower[c] && px[c] <= upper[c])
    });
    log::debug!(
        "color mask: seed ({seed}) color {color:?} tol {tolerance}, {} px selected",
        mask.count()
    );
    Ok(mask)
}
