use std::sync::Arc;

use coffee_ring_center::{locate_center, CenterError};
use coffee_ring_core::{
    CalibrationInput, CalibrationScale, Circle, GeometryError, RgbImage, RgbImageView,
};
use coffee_ring_profile::{
    crop_to_circle, sample_rgb, CircleRecord, ProfileCache, ProfileReport, ReportError,
    RgbRadialProfile,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{AnalysisParams, MAX_RADIUS};

/// Errors produced by the end-to-end helpers.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error("invalid RGB image buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbBuffer { expected: usize, got: usize },

    #[error("invalid RGB image dimensions (width={width}, height={height})")]
    InvalidRgbDimensions { width: u32, height: u32 },

    #[error("radius scale must be finite and positive (got {0})")]
    InvalidRadiusScale(f64),

    #[error("sampling radius {radius} px exceeds the limit of {max} px")]
    RadiusTooLarge { radius: u64, max: u32 },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Center(#[from] CenterError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[cfg(feature = "image")]
    #[error("image error for '{path}': {source}")]
    Image {
        path: std::path::PathBuf,
        #[source]
        source: ::image::ImageError,
    },
}

/// Everything one run produces for a single image.
#[derive(Clone, Debug)]
pub struct RingAnalysis {
    /// Reference points the scale was derived from.
    pub calibration: CalibrationInput,
    pub scale: Option<CalibrationScale>,
    /// Circle returned by the locator.
    pub detected: Circle,
    /// Circle after the override; the profile and crop use it.
    pub circle: Circle,
    pub profile: Arc<RgbRadialProfile>,
    pub crop: RgbImage,
    pub report: ProfileReport,
}

/// Run calibration, center location, radial sampling and cropping on `img`.
pub fn analyze_view(
    img: &RgbImageView<'_>,
    file_name: &str,
    params: &AnalysisParams,
) -> Result<RingAnalysis, AnalyzeError> {
    run(img, file_name, params, None)
}

/// Same as [`analyze_view`], reusing profiles already present in `cache`.
pub fn analyze_view_cached(
    img: &RgbImageView<'_>,
    file_name: &str,
    params: &AnalysisParams,
    cache: &mut ProfileCache,
) -> Result<RingAnalysis, AnalyzeError> {
    run(img, file_name, params, Some(cache))
}

/// Scale from explicit reference points, or from the default points.
///
/// Explicit points that do not define a scale are an error; default points can
/// coincide on tiny images, in which case the scale is left out.
fn resolve_scale(
    img: &RgbImageView<'_>,
    params: &AnalysisParams,
) -> Result<(CalibrationInput, Option<CalibrationScale>), GeometryError> {
    match params.calibration {
        Some(input) => Ok((input, Some(input.scale()?))),
        None => {
            let input = CalibrationInput::default_for(img.width, img.height);
            match input.scale() {
                Ok(scale) => Ok((input, Some(scale))),
                Err(err) => {
                    log::warn!("default calibration unusable: {err}");
                    Ok((input, None))
                }
            }
        }
    }
}

/// Located circle after the override, with the radius bounded.
fn sampling_circle(detected: Circle, params: &AnalysisParams) -> Result<Circle, AnalyzeError> {
    if params.radius.is_none() {
        let scaled = f64::from(detected.radius) * params.radius_scale;
        if scaled > f64::from(MAX_RADIUS) {
            return Err(AnalyzeError::RadiusTooLarge {
                radius: scaled.min(u64::MAX as f64) as u64,
                max: MAX_RADIUS,
            });
        }
    }
    Ok(params.adjustment().apply(detected))
}

#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, params, cache),
        fields(width = img.width, height = img.height)
    )
)]
fn run(
    img: &RgbImageView<'_>,
    file_name: &str,
    params: &AnalysisParams,
    cache: Option<&mut ProfileCache>,
) -> Result<RingAnalysis, AnalyzeError> {
    params.validate()?;
    let (calibration, scale) = resolve_scale(img, params)?;

    let strategy = params.center.strategy(img)?;
    let detected = locate_center(&strategy)?;
    let circle = sampling_circle(detected, params)?;
    if circle != detected {
        log::info!(
            "sampling circle ({}) r {} (located ({}) r {})",
            circle.center,
            circle.radius,
            detected.center,
            detected.radius
        );
    }

    let profile = match cache {
        Some(cache) => cache.get_or_sample(img, circle.center, circle.radius),
        None => Arc::new(sample_rgb(img, circle.center, circle.radius)),
    };
    let crop = crop_to_circle(img, &circle);
    let report = ProfileReport::new(
        file_name,
        CircleRecord::new(&circle, &detected, scale),
        &profile,
    );

    Ok(RingAnalysis {
        calibration,
        scale,
        detected,
        circle,
        profile,
        crop,
        report,
    })
}
