//! Concentric-ring sampling around a ring center.
//!
//! Ring `i` is sampled at the 360 integer degrees, at
//! `(cx + i·cos a, cy + i·sin a)` truncated toward zero. The first sample that
//! leaves the image ends that ring: the remaining angles are skipped, so rings
//! crossing the border are described by the arc walked before the exit.

use coffee_ring_core::{Channel, PixelPoint, RgbImageView};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::stats::mean_stddev;

/// Angular samples per ring, one per degree.
pub const ANGLE_STEPS: usize = 360;

/// A ring whose angular walk hit the image border.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OutOfBounds {
    pub radius: u32,
    /// Samples kept before the walk left the image.
    pub samples: usize,
}

/// Per-radius statistics of one channel, indexed by ring radius `0..=radius`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadialProfile {
    pub channel: Channel,
    pub mean: Vec<f64>,
    pub stddev: Vec<f64>,
    pub samples: Vec<usize>,
}

impl RadialProfile {
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Rings characterized by a partial arc.
    pub fn truncated_rings(&self) -> Vec<OutOfBounds> {
        truncated(&self.samples)
    }
}

/// R, G and B profiles sharing one radius axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RgbRadialProfile {
    pub center: PixelPoint,
    pub radius: u32,
    pub r: RadialProfile,
    pub g: RadialProfile,
    pub b: RadialProfile,
}

impl RgbRadialProfile {
    pub fn channel(&self, channel: Channel) -> &RadialProfile {
        match channel {
            Channel::R => &self.r,
            Channel::G => &self.g,
            Channel::B => &self.b,
        }
    }

    pub fn truncated_rings(&self) -> Vec<OutOfBounds> {
        self.r.truncated_rings()
    }
}

fn truncated(samples: &[usize]) -> Vec<OutOfBounds> {
    samples
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n < ANGLE_STEPS)
        .map(|(r, &n)| OutOfBounds {
            radius: r as u32,
            samples: n,
        })
        .collect()
}

/// `(cos a, sin a)` for each integer degree `a`.
fn build_degree_lut() -> Vec<(f64, f64)> {
    (0..ANGLE_STEPS)
        .map(|deg| {
            let (sin_t, cos_t) = (deg as f64).to_radians().sin_cos();
            (cos_t, sin_t)
        })
        .collect()
}

#[inline]
fn ring_point(center: PixelPoint, r: u32, dir: (f64, f64)) -> (i64, i64) {
    let x = f64::from(center.x) + f64::from(r) * dir.0;
    let y = f64::from(center.y) + f64::from(r) * dir.1;
    (x as i64, y as i64)
}

/// Pixel coordinates kept for ring `r`, in angle order.
fn ring_pixels(
    img: &RgbImageView<'_>,
    lut: &[(f64, f64)],
    center: PixelPoint,
    r: u32,
    out: &mut Vec<(usize, usize)>,
) {
    out.clear();
    for &dir in lut {
        let (x, y) = ring_point(center, r, dir);
        if !img.contains(x, y) {
            break;
        }
        out.push((x as usize, y as usize));
    }
}

fn empty_profile(channel: Channel, len: usize) -> RadialProfile {
    RadialProfile {
        channel,
        mean: Vec::with_capacity(len),
        stddev: Vec::with_capacity(len),
        samples: Vec::with_capacity(len),
    }
}

fn push_ring(
    profile: &mut RadialProfile,
    img: &RgbImageView<'_>,
    pixels: &[(usize, usize)],
    values: &mut Vec<u8>,
) {
    values.clear();
    values.extend(pixels.iter().map(|&(x, y)| img.value(x, y, profile.channel)));
    let (mean, stddev) = mean_stddev(values);
    profile.mean.push(mean);
    profile.stddev.push(stddev);
    profile.samples.push(values.len());
}

/// Radial profile of one channel for rings `0..=radius`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn sample(
    img: &RgbImageView<'_>,
    channel: Channel,
    center: PixelPoint,
    radius: u32,
) -> RadialProfile {
    let lut = build_degree_lut();
    let len = radius as usize + 1;
    let mut profile = empty_profile(channel, len);
    let mut pixels = Vec::with_capacity(ANGLE_STEPS);
    let mut values = Vec::with_capacity(ANGLE_STEPS);
    for r in 0..=radius {
        ring_pixels(img, &lut, center, r, &mut pixels);
        push_ring(&mut profile, img, &pixels, &mut values);
    }
    profile
}

/// Radial profiles of R, G and B for rings `0..=radius`.
///
/// Ring geometry is computed once and shared by the three channels.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img), fields(width = img.width, height = img.height))
)]
pub fn sample_rgb(img: &RgbImageView<'_>, center: PixelPoint, radius: u32) -> RgbRadialProfile {
    let lut = build_degree_lut();
    let len = radius as usize + 1;
    let [mut r_prof, mut g_prof, mut b_prof] = Channel::ALL.map(|c| empty_profile(c, len));
    let mut pixels = Vec::with_capacity(ANGLE_STEPS);
    let mut values = Vec::with_capacity(ANGLE_STEPS);

    for r in 0..=radius {
        ring_pixels(img, &lut, center, r, &mut pixels);
        push_ring(&mut r_prof, img, &pixels, &mut values);
        push_ring(&mut g_prof, img, &pixels, &mut values);
        push_ring(&mut b_prof, img, &pixels, &mut values);
    }

    let out = RgbRadialProfile {
        center,
        radius,
        r: r_prof,
        g: g_prof,
        b: b_prof,
    };
    let cut = out.truncated_rings();
    if let Some(first) = cut.first() {
        log::debug!(
            "{} of {} rings leave the image, first at r={} ({} samples)",
            cut.len(),
            len,
            first.radius,
            first.samples
        );
    }
    out
}

/// Channel values along one direction from the center, stopping at the image
/// border. Intended for quick previews.
pub fn radial_profile_direction(
    img: &RgbImageView<'_>,
    channel: Channel,
    center: PixelPoint,
    radius: u32,
    angle_deg: f64,
) -> Vec<u8> {
    let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();
    let mut out = Vec::with_capacity(radius as usize + 1);
    for r in 0..=radius {
        let (x, y) = ring_point(center, r, (cos_t, sin_t));
        if !img.contains(x, y) {
            break;
        }
        out.push(img.value(x as usize, y as usize, channel));
    }
    out
}
