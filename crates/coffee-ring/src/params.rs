use coffee_ring_center::{CenterOverride, CenterStrategy, ColorThresholdParams};
use coffee_ring_core::{CalibrationInput, PixelPoint, RgbImageView};
use serde::{Deserialize, Serialize};

use crate::AnalyzeError;

/// Default enlargement of the located radius, so the whole ring falls inside
/// the sampled disk.
pub const DEFAULT_RADIUS_SCALE: f64 = 1.2;

/// Largest sampling radius accepted by the pipeline, in pixels.
pub const MAX_RADIUS: u32 = 1 << 16;

/// How the ring circle is located.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CenterMethod {
    /// Minimum enclosing circle of the largest region matching the seed color.
    ColorThreshold(ColorThresholdParams),
    /// Circumcircle of three points picked on the ring.
    ThreePoint { points: [PixelPoint; 3] },
}

impl Default for CenterMethod {
    fn default() -> Self {
        Self::ColorThreshold(ColorThresholdParams::default())
    }
}

impl CenterMethod {
    /// Build the locator input for `img`.
    pub fn strategy(&self, img: &RgbImageView<'_>) -> Result<CenterStrategy, AnalyzeError> {
        Ok(match self {
            Self::ColorThreshold(p) => CenterStrategy::Mask(p.build_mask(img)?),
            Self::ThreePoint { points: [a, b, c] } => CenterStrategy::ThreePoint(*a, *b, *c),
        })
    }
}

/// Parameters of one analysis run, loadable from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Reference points for the mm/px scale. When absent the default points
    /// of [`CalibrationInput::default_for`] are used.
    pub calibration: Option<CalibrationInput>,
    pub center: CenterMethod,
    /// Replaces the located center.
    pub center_override: Option<PixelPoint>,
    /// Sampling radius in pixels; wins over `radius_scale`.
    pub radius: Option<u32>,
    /// Factor applied to the located radius.
    pub radius_scale: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            calibration: None,
            center: CenterMethod::default(),
            center_override: None,
            radius: None,
            radius_scale: DEFAULT_RADIUS_SCALE,
        }
    }
}

impl AnalysisParams {
    /// Reject radius settings that cannot produce a usable sampling circle.
    pub fn validate(&self) -> Result<(), AnalyzeError> {
        if !self.radius_scale.is_finite() || self.radius_scale <= 0.0 {
            return Err(AnalyzeError::InvalidRadiusScale(self.radius_scale));
        }
        match self.radius {
            Some(radius) if radius > MAX_RADIUS => Err(AnalyzeError::RadiusTooLarge {
                radius: u64::from(radius),
                max: MAX_RADIUS,
            }),
            _ => Ok(()),
        }
    }

    pub fn adjustment(&self) -> CenterOverride {
        CenterOverride {
            center: self.center_override,
            radius: self.radius,
            radius_scale: self.radius_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let p: AnalysisParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p, AnalysisParams::default());
        assert_eq!(p.adjustment().radius_scale, DEFAULT_RADIUS_SCALE);
    }

    #[test]
    fn color_threshold_fields_default() {
        let p: AnalysisParams =
            serde_json::from_str(r#"{"center": {"method": "color_threshold", "tolerance": 7}}"#)
                .unwrap();
        match p.center {
            CenterMethod::ColorThreshold(c) => {
                assert_eq!(c.tolerance, 7);
                assert_eq!(c.seed, None);
            }
            other => panic!("unexpected method {other:?}"),
        }
    }

    #[test]
    fn three_point_config_parses() {
        let json = r#"{
            "center": {
                "method": "three_point",
                "points": [{"x": 0, "y": 0}, {"x": 3, "y": 0}, {"x": 0, "y": 4}]
            },
            "radius": 40
        }"#;
        let p: AnalysisParams = serde_json::from_str(json).unwrap();
        assert_eq!(
            p.center,
            CenterMethod::ThreePoint {
                points: [
                    PixelPoint::new(0, 0),
                    PixelPoint::new(3, 0),
                    PixelPoint::new(0, 4)
                ]
            }
        );
        assert_eq!(p.radius, Some(40));
        assert_eq!(p.radius_scale, DEFAULT_RADIUS_SCALE);
        assert_eq!(p.adjustment().center, None);
    }

    #[test]
    fn radius_scale_must_be_finite_and_positive() {
        assert!(AnalysisParams::default().validate().is_ok());
        for bad in [0.0, -1.2, f64::NAN, f64::INFINITY] {
            let p = AnalysisParams {
                radius_scale: bad,
                ..AnalysisParams::default()
            };
            assert!(matches!(
                p.validate(),
                Err(AnalyzeError::InvalidRadiusScale(_))
            ));
        }
    }

    #[test]
    fn explicit_radius_is_bounded() {
        let ok = AnalysisParams {
            radius: Some(MAX_RADIUS),
            ..AnalysisParams::default()
        };
        assert!(ok.validate().is_ok());
        let too_big = AnalysisParams {
            radius: Some(u32::MAX),
            ..AnalysisParams::default()
        };
        assert!(matches!(
            too_big.validate(),
            Err(AnalyzeError::RadiusTooLarge { max: MAX_RADIUS, .. })
        ));
    }

    #[test]
    fn defaults_round_trip_through_json() {
        let p = AnalysisParams::default();
        let text = serde_json::to_string_pretty(&p).unwrap();
        let back: AnalysisParams = serde_json::from_str(&text).unwrap();
        assert_eq!(back, p);
    }
}
