//! `image` crate integration: buffer conversion, loading and end-to-end helpers.

use std::path::Path;

use coffee_ring_core::{RgbImage, RgbImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{analyze_view, AnalysisParams, AnalyzeError, RingAnalysis};

/// Convert an `image::RgbImage` into the lightweight `coffee-ring-core` view type.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build an `image::RgbImage` from interleaved RGB bytes, validating the length.
pub fn rgb_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::RgbImage, AnalyzeError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(AnalyzeError::InvalidRgbDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h).and_then(|n| n.checked_mul(3)) else {
        return Err(AnalyzeError::InvalidRgbDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(AnalyzeError::InvalidRgbBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::RgbImage::from_raw(width, height, pixels.to_vec())
        .ok_or(AnalyzeError::InvalidRgbDimensions { width, height })
}

/// Owned core image to `image::RgbImage`.
pub fn to_image(img: &RgbImage) -> Result<::image::RgbImage, AnalyzeError> {
    let width = u32::try_from(img.width).unwrap_or(u32::MAX);
    let height = u32::try_from(img.height).unwrap_or(u32::MAX);
    rgb_image_from_slice(width, height, &img.data)
}

/// Decode an image file into 8-bit RGB.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(path)))]
pub fn load_rgb(path: &Path) -> Result<::image::RgbImage, AnalyzeError> {
    let img = ::image::open(path).map_err(|source| AnalyzeError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Run the full analysis on an `image::RgbImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn analyze_image(
    img: &::image::RgbImage,
    file_name: &str,
    params: &AnalysisParams,
) -> Result<RingAnalysis, AnalyzeError> {
    analyze_view(&rgb_view(img), file_name, params)
}

/// Run the full analysis on a raw interleaved RGB buffer.
pub fn analyze_rgb_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    file_name: &str,
    params: &AnalysisParams,
) -> Result<RingAnalysis, AnalyzeError> {
    let img = rgb_image_from_slice(width, height, pixels)?;
    analyze_image(&img, file_name, params)
}
