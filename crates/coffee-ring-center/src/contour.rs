//! External contour extraction from a binary mask.
//!
//! Foreground regions are 8-connected. Each region contributes one outer
//! boundary traced with Moore-neighbour following; holes are not traced.

use std::collections::VecDeque;

use coffee_ring_core::{Mask, PixelPoint};

/// Clockwise neighbour offsets in image coordinates (y down), starting east.
const DIRS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
const WEST: usize = 4;

/// Closed outer boundary of one foreground region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<PixelPoint>,
}

impl Contour {
    /// Polygon area enclosed by the boundary pixel centers (shoelace).
    ///
    /// Degenerate boundaries (single pixel, one-pixel-wide lines) enclose 0.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0i64;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice += i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y);
        }
        twice.abs() as f64 * 0.5
    }
}

fn dir_index(dx: i32, dy: i32) -> usize {
    DIRS.iter()
        .position(|&d| d == (dx, dy))
        .unwrap_or(WEST)
}

fn offset(p: PixelPoint, d: usize) -> PixelPoint {
    PixelPoint::new(p.x + DIRS[d].0, p.y + DIRS[d].1)
}

fn is_on(mask: &Mask, p: PixelPoint) -> bool {
    mask.get(i64::from(p.x), i64::from(p.y))
}

/// Next boundary pixel clockwise around `cur`, starting after the background
/// neighbour in direction `back`. Returns the pixel and the direction from it
/// back to the last background neighbour examined.
fn step(mask: &Mask, cur: PixelPoint, back: usize) -> Option<(PixelPoint, usize)> {
    for k in 1..=8 {
        let d = (back + k) % 8;
        let next = offset(cur, d);
        if is_on(mask, next) {
            let bg = offset(cur, (d + 7) % 8);
            return Some((next, dir_index(bg.x - next.x, bg.y - next.y)));
        }
    }
    None
}

/// Trace the outer boundary of the region whose raster-first pixel is `start`.
fn trace_boundary(mask: &Mask, start: PixelPoint) -> Contour {
    // Everything north and west of the raster-first pixel is background, so
    // the walk may begin as if it had arrived from the west.
    let limit = 4 * mask.width * mask.height + 8;
    let mut points = Vec::new();
    let (mut cur, mut back) = (start, WEST);
    let mut first_move: Option<PixelPoint> = None;

    loop {
        let Some((next, next_back)) = step(mask, cur, back) else {
            points.push(cur);
            break;
        };
        match first_move {
            None => first_move = Some(next),
            Some(first) if cur == start && next == first => break,
            _ => {}
        }
        points.push(cur);
        if points.len() > limit {
            log::warn!("contour trace from ({start}) did not close, truncating");
            break;
        }
        cur = next;
        back = next_back;
    }
    Contour { points }
}

/// Extract one outer contour per 8-connected foreground region, in raster
/// order of each region's first pixel.
pub fn find_external_contours(mask: &Mask) -> Vec<Contour> {
    let (w, h) = (mask.width, mask.height);
    let mut labelled = vec![false; w * h];
    let mut contours = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if labelled[idx] || mask.data[idx] == 0 {
                continue;
            }
            let start = PixelPoint::new(x as i32, y as i32);
            contours.push(trace_boundary(mask, start));

            labelled[idx] = true;
            queue.push_back(start);
            while let Some(p) = queue.pop_front() {
                for d in 0..8 {
                    let n = offset(p, d);
                    if !is_on(mask, n) {
                        continue;
                    }
                    let ni = n.y as usize * w + n.x as usize;
                    if !labelled[ni] {
                        labelled[ni] = true;
                        queue.push_back(n);
                    }
                }
            }
        }
    }
    contours
}

/// Contour with the largest enclosed area; ties keep the earliest.
pub fn largest_contour(contours: &[Contour]) -> Option<&Contour> {
    let mut best: Option<(&Contour, f64)> = None;
    for c in contours {
        let area = c.area();
        if best.map(|(_, a)| area > a).unwrap_or(true) {
            best = Some((c, area));
        }
    }
    best.map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> Mask {
        let h = rows.len();
        let w = rows[0].len();
        Mask::from_fn(w, h, |x, y| rows[y].as_bytes()[x] == b'#')
    }

    #[test]
    fn empty_mask_has_no_contours() {
        let mask = Mask::new(5, 5);
        assert!(find_external_contours(&mask).is_empty());
    }

    #[test]
    fn single_pixel_contour() {
        let mask = mask_from_rows(&["...", ".#.", "..."]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points, vec![PixelPoint::new(1, 1)]);
        assert_eq!(contours[0].area(), 0.0);
    }

    #[test]
    fn square_boundary_is_traced_clockwise_once() {
        let mask = mask_from_rows(&[".....", ".###.", ".###.", ".###.", "....."]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        let pts = &contours[0].points;
        assert_eq!(
            pts,
            &vec![
                PixelPoint::new(1, 1),
                PixelPoint::new(2, 1),
                PixelPoint::new(3, 1),
                PixelPoint::new(3, 2),
                PixelPoint::new(3, 3),
                PixelPoint::new(2, 3),
                PixelPoint::new(1, 3),
                PixelPoint::new(1, 2),
            ]
        );
        assert_eq!(contours[0].area(), 4.0);
    }

    #[test]
    fn diagonal_neighbours_join_one_region() {
        let mask = mask_from_rows(&["#..", ".#.", "..#"]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(
            contours[0].points,
            vec![
                PixelPoint::new(0, 0),
                PixelPoint::new(1, 1),
                PixelPoint::new(2, 2),
                PixelPoint::new(1, 1),
            ]
        );
    }

    #[test]
    fn ring_contributes_only_its_outer_boundary() {
        let mask = mask_from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points.len(), 16);
        assert_eq!(contours[0].area(), 16.0);
    }

    #[test]
    fn largest_region_wins() {
        let mask = mask_from_rows(&[
            "##......", "##......", "........", "...####.", "...####.", "...####.",
        ]);
        let contours = find_external_contours(&mask);
        assert_eq!(contours.len(), 2);
        let best = largest_contour(&contours).unwrap();
        assert_eq!(best.points[0], PixelPoint::new(3, 3));
        assert_eq!(best.area(), 6.0);
    }
}
