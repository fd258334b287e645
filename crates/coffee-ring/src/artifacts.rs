use std::fs;
use std::path::{Path, PathBuf};

use coffee_ring_profile::ReportError;

use crate::{
    render_channel_panel, render_overlay, render_profile_plot, to_image, AnalyzeError,
    RingAnalysis,
};

fn save_png(img: &::image::RgbImage, path: PathBuf) -> Result<PathBuf, AnalyzeError> {
    img.save(&path).map_err(|source| AnalyzeError::Image {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Write every artifact of `analysis` into `dir`:
/// the report tables (`<stem>_RadialProfile.csv`, `<stem>_circle.csv`,
/// `<stem>_RadialProfile.json`), the chart `<stem>_RadialProfile.png`, the
/// overlay `<stem>_overlay.png`, the channel panel `<stem>_channels.png` built
/// from the overlay, and the circle crop `<stem>_crop.png`.
///
/// An empty crop (circle entirely outside the image) is skipped.
pub fn save_artifacts(
    img: &::image::RgbImage,
    analysis: &RingAnalysis,
    dir: &Path,
) -> Result<Vec<PathBuf>, AnalyzeError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Create {
        path: dir.to_path_buf(),
        source,
    })?;
    let stem = analysis.report.stem();
    let mut written = analysis.report.save(dir)?;

    let plot = render_profile_plot(&analysis.profile);
    written.push(save_png(
        &plot,
        dir.join(format!("{stem}_RadialProfile.png")),
    )?);

    let overlay = render_overlay(img, analysis);
    written.push(save_png(&overlay, dir.join(format!("{stem}_overlay.png")))?);

    let channels = render_channel_panel(&overlay)?;
    written.push(save_png(&channels, dir.join(format!("{stem}_channels.png")))?);

    if analysis.crop.is_empty() {
        log::warn!("circle lies outside the image, no crop written");
    } else {
        let crop = to_image(&analysis.crop)?;
        written.push(save_png(&crop, dir.join(format!("{stem}_crop.png")))?);
    }

    log::info!("wrote {} artifacts to {}", written.len(), dir.display());
    Ok(written)
}
