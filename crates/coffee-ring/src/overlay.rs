//! Annotated copies of the input image and the profile chart.

use ::image::{imageops, Rgb, RgbImage};
use coffee_ring_core::{Channel, PixelPoint};
use coffee_ring_profile::{channel_plane, RgbRadialProfile};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

use crate::{rgb_view, to_image, AnalyzeError, RingAnalysis};

const MARKER: Rgb<u8> = Rgb([255, 255, 0]);
const CIRCLE: Rgb<u8> = Rgb([0, 0, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const CENTER_DOT_RADIUS: i32 = 3;
const MARKER_RADIUS: i32 = 1;

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn xy(p: PixelPoint) -> (i32, i32) {
    (p.x, p.y)
}

/// Input image with the calibration points, the ring center and the sampling
/// circle drawn on top.
pub fn render_overlay(img: &RgbImage, analysis: &RingAnalysis) -> RgbImage {
    let mut out = img.clone();
    for p in [analysis.calibration.p1, analysis.calibration.p2] {
        draw_filled_circle_mut(&mut out, xy(p), MARKER_RADIUS, MARKER);
    }
    let center = xy(analysis.circle.center);
    draw_filled_circle_mut(&mut out, center, CENTER_DOT_RADIUS, CIRCLE);
    draw_hollow_circle_mut(&mut out, center, to_i32(analysis.circle.radius), CIRCLE);
    out
}

/// 2x2 channel inspection panel: `img` top-left, then its R, G and B planes
/// as gray images (top-right, bottom-left, bottom-right).
pub fn render_channel_panel(img: &RgbImage) -> Result<RgbImage, AnalyzeError> {
    let (w, h) = img.dimensions();
    let mut panel = RgbImage::new(w * 2, h * 2);
    imageops::replace(&mut panel, img, 0, 0);
    let view = rgb_view(img);
    let slots = [(i64::from(w), 0), (0, i64::from(h)), (i64::from(w), i64::from(h))];
    for (channel, (x, y)) in Channel::ALL.into_iter().zip(slots) {
        let plane = to_image(&channel_plane(&view, channel))?;
        imageops::replace(&mut panel, &plane, x, y);
    }
    Ok(panel)
}

fn mean_color(channel: Channel) -> Rgb<u8> {
    match channel {
        Channel::R => Rgb([0xdc, 0x56, 0x5a]),
        Channel::G => Rgb([0x56, 0xdc, 0x95]),
        Channel::B => Rgb([0x56, 0x9d, 0xdc]),
    }
}

fn stddev_color(channel: Channel) -> Rgb<u8> {
    match channel {
        Channel::R => Rgb([0xe6, 0x87, 0x8a]),
        Channel::G => Rgb([0x87, 0xe6, 0xb4]),
        Channel::B => Rgb([0x87, 0xb9, 0xe6]),
    }
}

/// Pixel box of one chart panel.
#[derive(Clone, Copy)]
struct Panel {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl Panel {
    fn frame(&self, canvas: &mut RgbImage) {
        let (l, t) = (self.left, self.top);
        let (r, b) = (l + self.width, t + self.height);
        draw_line_segment_mut(canvas, (l, t), (l, b), AXIS);
        draw_line_segment_mut(canvas, (l, b), (r, b), AXIS);
    }

    /// Polyline of `values` scaled to `[0, y_max]`; NaN entries break the line.
    /// With `dashed`, every other segment is skipped.
    fn series(
        &self,
        canvas: &mut RgbImage,
        values: &[f64],
        y_max: f64,
        color: Rgb<u8>,
        dashed: bool,
    ) {
        let x_span = (values.len().max(2) - 1) as f32;
        let to_px = |i: usize, v: f64| {
            let x = self.left + self.width * i as f32 / x_span;
            let y = self.top + self.height * (1.0 - (v / y_max).clamp(0.0, 1.0) as f32);
            (x, y)
        };
        for (i, pair) in values.windows(2).enumerate() {
            if dashed && i % 2 == 1 {
                continue;
            }
            let (a, b) = (pair[0], pair[1]);
            if a.is_nan() || b.is_nan() {
                continue;
            }
            draw_line_segment_mut(canvas, to_px(i, a), to_px(i + 1, b), color);
        }
    }
}

pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 520;

/// Chart of the radial profile: channel means (0-255) in the upper panel,
/// standard deviations (dashed, auto-scaled) in the lower one.
pub fn render_profile_plot(profile: &RgbRadialProfile) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(PLOT_WIDTH, PLOT_HEIGHT, Rgb([255, 255, 255]));
    let upper = Panel {
        left: 50.0,
        top: 20.0,
        width: PLOT_WIDTH as f32 - 70.0,
        height: 220.0,
    };
    let lower = Panel {
        top: 280.0,
        ..upper
    };
    upper.frame(&mut canvas);
    lower.frame(&mut canvas);

    let std_max = Channel::ALL
        .iter()
        .flat_map(|&c| profile.channel(c).stddev.iter().copied())
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max)
        .max(1.0);

    for c in Channel::ALL {
        let p = profile.channel(c);
        upper.series(&mut canvas, &p.mean, 255.0, mean_color(c), false);
        lower.series(&mut canvas, &p.stddev, std_max, stddev_color(c), true);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyze_view, AnalysisParams, CenterMethod};
    use coffee_ring_core::RgbImage as CoreImage;
    use coffee_ring_profile::sample_rgb;

    #[test]
    fn overlay_marks_center_and_circle() {
        let core = CoreImage::filled(60, 60, [200, 200, 200]);
        let params = AnalysisParams {
            center: CenterMethod::ThreePoint {
                points: [
                    PixelPoint::new(20, 30),
                    PixelPoint::new(40, 30),
                    PixelPoint::new(30, 40),
                ],
            },
            radius: Some(10),
            ..AnalysisParams::default()
        };
        let analysis = analyze_view(&core.view(), "flat.png", &params).unwrap();
        let img = crate::to_image(&core).unwrap();
        let out = render_overlay(&img, &analysis);

        assert_eq!(out.dimensions(), img.dimensions());
        assert_eq!(*out.get_pixel(30, 30), CIRCLE);
        assert_eq!(*out.get_pixel(40, 30), CIRCLE);
        assert_eq!(*out.get_pixel(20, 20), MARKER);
        assert_eq!(*out.get_pixel(5, 5), Rgb([200, 200, 200]));
    }

    #[test]
    fn channel_panel_tiles_rgb_and_planes() {
        let img = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        let panel = render_channel_panel(&img).unwrap();
        assert_eq!(panel.dimensions(), (8, 6));
        assert_eq!(*panel.get_pixel(1, 1), Rgb([10, 20, 30]));
        assert_eq!(*panel.get_pixel(5, 1), Rgb([10, 10, 10]));
        assert_eq!(*panel.get_pixel(1, 4), Rgb([20, 20, 20]));
        assert_eq!(*panel.get_pixel(7, 5), Rgb([30, 30, 30]));
    }

    #[test]
    fn plot_has_fixed_size_and_draws_series() {
        let core = CoreImage::filled(40, 40, [255, 128, 0]);
        let profile = sample_rgb(&core.view(), PixelPoint::new(20, 20), 10);
        let plot = render_profile_plot(&profile);
        assert_eq!(plot.dimensions(), (PLOT_WIDTH, PLOT_HEIGHT));
        // The R mean sits on the top edge of the upper panel.
        assert_eq!(*plot.get_pixel(400, 20), mean_color(Channel::R));
    }
}
