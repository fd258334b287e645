//! Circle masking, cropping and channel planes for visual inspection.

use coffee_ring_core::{Channel, Circle, RgbImage, RgbImageView};

/// Half-open range `[lo, hi)` clipped to `[0, len)`.
fn clip(lo: i64, hi: i64, len: usize) -> (usize, usize) {
    let lo = lo.clamp(0, len as i64) as usize;
    let hi = hi.clamp(0, len as i64) as usize;
    (lo, hi.max(lo))
}

/// Copy of `img` restricted to `[x1, x2) × [y1, y2)`.
///
/// The rectangle is clipped to the image, so an out-of-range request yields a
/// smaller (possibly empty) image instead of failing.
pub fn crop_rect(img: &RgbImageView<'_>, x1: i64, y1: i64, x2: i64, y2: i64) -> RgbImage {
    let (x0, x1) = clip(x1, x2, img.width);
    let (y0, y1) = clip(y1, y2, img.height);
    let width = x1 - x0;
    let height = y1 - y0;
    let mut data = Vec::with_capacity(width * height * 3);
    for y in y0..y1 {
        let row = (y * img.width + x0) * 3;
        data.extend_from_slice(&img.data[row..row + width * 3]);
    }
    RgbImage {
        width,
        height,
        data,
    }
}

/// Black out everything outside the filled disk, then crop to the bounding
/// square `[cx - r, cx + r] × [cy - r, cy + r]`.
///
/// The square is clipped to the image.
pub fn crop_to_circle(img: &RgbImageView<'_>, circle: &Circle) -> RgbImage {
    let cx = i64::from(circle.center.x);
    let cy = i64::from(circle.center.y);
    let r = i64::from(circle.radius);

    let r2 = i128::from(r) * i128::from(r);
    let mut masked = img.to_owned_image();
    for y in 0..img.height {
        let dy = i128::from(y as i64 - cy);
        for x in 0..img.width {
            let dx = i128::from(x as i64 - cx);
            if dx * dx + dy * dy > r2 {
                masked.put_pixel(x, y, [0, 0, 0]);
            }
        }
    }

    let out = crop_rect(&masked.view(), cx - r, cy - r, cx + r + 1, cy + r + 1);
    let side = 2 * r + 1;
    if out.width as i64 != side || out.height as i64 != side {
        log::debug!(
            "circle crop clipped to {}x{} (requested {side}x{side})",
            out.width,
            out.height
        );
    }
    out
}

/// One channel rendered as a gray RGB image.
pub fn channel_plane(img: &RgbImageView<'_>, channel: Channel) -> RgbImage {
    let mut out = RgbImage::new(img.width, img.height);
    for y in 0..img.height {
        for x in 0..img.width {
            let v = img.value(x, y, channel);
            out.put_pixel(x, y, [v, v, v]);
        }
    }
    out
}
