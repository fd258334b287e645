use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use coffee_ring::{
    analyze_image, load_rgb, save_artifacts, AnalysisParams, CenterMethod, ColorThresholdParams,
    PixelPoint,
};

#[cfg(not(feature = "tracing"))]
use coffee_ring::core::{init_with_level, level_from_str};
#[cfg(feature = "tracing")]
use coffee_ring::core::init_tracing;

#[cfg(not(feature = "tracing"))]
use log::info;
#[cfg(feature = "tracing")]
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "coffee-ring", version, about = "Radial intensity profiles of coffee-ring deposits")]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one image and write its report, chart, overlay and crop.
    Analyze(AnalyzeArgs),
    /// Print the default analysis config as JSON.
    DefaultConfig,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Input image (any format the `image` crate decodes).
    image: PathBuf,

    /// JSON analysis config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the artifacts.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Replace the located center, as `x,y`.
    #[arg(long, allow_hyphen_values = true)]
    center: Option<PixelPoint>,

    /// Sampling radius in pixels.
    #[arg(long)]
    radius: Option<u32>,

    /// Factor applied to the located radius.
    #[arg(long)]
    radius_scale: Option<f64>,

    /// Locate the ring from three points on it instead of a color mask.
    #[arg(long, num_args = 3, value_names = ["X,Y", "X,Y", "X,Y"], allow_hyphen_values = true)]
    three_point: Option<Vec<PixelPoint>>,

    /// Seed pixel of the color mask, as `x,y`.
    #[arg(long, conflicts_with = "three_point")]
    seed: Option<PixelPoint>,

    /// Color mask tolerance per channel (1-50).
    #[arg(long, conflicts_with = "three_point")]
    tolerance: Option<u8>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    init_with_level(level_from_str(&cli.log_level))?;
    #[cfg(feature = "tracing")]
    init_tracing(false);

    match cli.command {
        Command::Analyze(args) => run_analyze(&args),
        Command::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&AnalysisParams::default())?);
            Ok(())
        }
    }
}

fn load_params(path: Option<&Path>) -> Result<AnalysisParams, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(AnalysisParams::default()),
    }
}

fn apply_flags(mut params: AnalysisParams, args: &AnalyzeArgs) -> AnalysisParams {
    if let Some(points) = &args.three_point {
        if let [a, b, c] = points[..] {
            params.center = CenterMethod::ThreePoint { points: [a, b, c] };
        }
    } else if args.seed.is_some() || args.tolerance.is_some() {
        let mut threshold = match params.center {
            CenterMethod::ColorThreshold(p) => p,
            CenterMethod::ThreePoint { .. } => ColorThresholdParams::default(),
        };
        if let Some(seed) = args.seed {
            threshold.seed = Some(seed);
        }
        if let Some(tolerance) = args.tolerance {
            threshold.tolerance = tolerance;
        }
        params.center = CenterMethod::ColorThreshold(threshold);
    }
    if args.center.is_some() {
        params.center_override = args.center;
    }
    if args.radius.is_some() {
        params.radius = args.radius;
    }
    if let Some(scale) = args.radius_scale {
        params.radius_scale = scale;
    }
    params
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(args)))]
fn run_analyze(args: &AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = apply_flags(load_params(args.config.as_deref())?, args);
    let img = load_rgb(&args.image)?;
    let file_name = args
        .image
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.image.to_string_lossy().into_owned());
    info!("analyzing {} ({}x{})", file_name, img.width(), img.height());

    let analysis = analyze_image(&img, &file_name, &params)?;
    let truncated = analysis.report.truncated_rings.len();
    if truncated > 0 {
        info!("{truncated} rings reach the image border and use a partial arc");
    }

    let written = save_artifacts(&img, &analysis, &args.out_dir)?;
    println!(
        "center ({}) radius {} px (located {} px), scale {}",
        analysis.circle.center,
        analysis.circle.radius,
        analysis.detected.radius,
        analysis
            .scale
            .map(|s| format!("{:.6} mm/px", s.mm_per_px()))
            .unwrap_or_else(|| "n/a".to_string())
    );
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
