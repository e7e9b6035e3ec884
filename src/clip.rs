//! Clipping against the scissor rectangle
//!
//! Lines are clipped parametrically (Liang-Barsky). The entry/exit fractions
//! are kept so a gradient's endpoint colors can be re-interpolated to the
//! visible sub-segment. Gradient rectangles re-interpolate their corner
//! colors the same way for every edge the scissor cuts.
//!
//! All float-to-integer conversions round half up: `(v + 0.5).floor()`.

use crate::blend::FixedColor;
use crate::color::Color;
use crate::geometry::{Point, Rect};

#[inline]
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// True if the point lies outside `clip` (bounds inclusive)
#[inline]
pub fn point_clipped(p: Point, clip: &Rect) -> bool {
    !clip.contains_point(p)
}

/// True if both endpoints are beyond the same edge of `clip`
pub fn line_trivially_outside(start: Point, end: Point, clip: &Rect) -> bool {
    (start.x < clip.upper_left.x && end.x < clip.upper_left.x)
        || (start.x > clip.lower_right.x && end.x > clip.lower_right.x)
        || (start.y < clip.upper_left.y && end.y < clip.upper_left.y)
        || (start.y > clip.lower_right.y && end.y > clip.lower_right.y)
}

/// Visible part of a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedLine {
    pub start: Point,
    pub end: Point,
    /// Entry fraction along the original segment
    pub u1: f64,
    /// Exit fraction along the original segment
    pub u2: f64,
}

impl ClippedLine {
    /// Endpoint colors of the visible part, in fixed point
    pub fn colors(&self, c0: Color, c1: Color) -> (FixedColor, FixedColor) {
        let from = FixedColor::from_color(c0);
        let to = FixedColor::from_color(c1);
        (from.lerp(to, self.u1), from.lerp(to, self.u2))
    }
}

/// Liang-Barsky clip of `start..=end` against `clip`.
///
/// Returns `None` when no part of the segment is inside.
pub fn clip_line(start: Point, end: Point, clip: &Rect) -> Option<ClippedLine> {
    if !clip.is_valid() {
        return None;
    }

    // Spans of far-off endpoints can exceed i32, so work in f64 throughout
    let (x0, y0) = (f64::from(start.x), f64::from(start.y));
    let dx = f64::from(end.x) - x0;
    let dy = f64::from(end.y) - y0;
    let mut u1 = 0.0_f64;
    let mut u2 = 1.0_f64;

    // (p, q) per half-plane: left, right, top, bottom
    let edges = [
        (-dx, x0 - f64::from(clip.upper_left.x)),
        (dx, f64::from(clip.lower_right.x) - x0),
        (-dy, y0 - f64::from(clip.upper_left.y)),
        (dy, f64::from(clip.lower_right.y) - y0),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge: inside or out for the whole length
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > u2 {
                return None;
            }
            if r > u1 {
                u1 = r;
            }
        } else {
            if r < u1 {
                return None;
            }
            if r < u2 {
                u2 = r;
            }
        }
    }

    // Clamp guards against float error pushing a rounded endpoint one pixel out
    let at = |u: f64| {
        let x = (x0 + round_half_up(u * dx))
            .clamp(f64::from(clip.upper_left.x), f64::from(clip.lower_right.x));
        let y = (y0 + round_half_up(u * dy))
            .clamp(f64::from(clip.upper_left.y), f64::from(clip.lower_right.y));
        Point::new(x as i32, y as i32)
    };

    Some(ClippedLine {
        start: at(u1),
        end: at(u2),
        u1,
        u2,
    })
}

/// Corner index order used by rectangle gradients
pub const UPPER_LEFT: usize = 0;
pub const UPPER_RIGHT: usize = 1;
pub const LOWER_RIGHT: usize = 2;
pub const LOWER_LEFT: usize = 3;

/// Clip a gradient rectangle.
///
/// Returns the visible rectangle and its corner colors, interpolated so that
/// the gradient over the visible part matches the unclipped gradient.
pub fn clip_rect_gradient(
    rect: &Rect,
    corners: [Color; 4],
    clip: &Rect,
) -> Option<(Rect, [FixedColor; 4])> {
    let visible = rect.intersection(clip);
    if !visible.is_valid() {
        return None;
    }

    let mut c = corners.map(FixedColor::from_color);

    let left = f64::from(rect.upper_left.x);
    let top = f64::from(rect.upper_left.y);
    let span_x = f64::from(rect.lower_right.x) - left;
    let span_y = f64::from(rect.lower_right.y) - top;

    let left_clipped = visible.upper_left.x > rect.upper_left.x;
    let right_clipped = visible.lower_right.x < rect.lower_right.x;
    if left_clipped || right_clipped {
        let t_left = (f64::from(visible.upper_left.x) - left) / span_x;
        let t_right = (f64::from(visible.lower_right.x) - left) / span_x;
        let (ul, ur, lr, ll) = (c[UPPER_LEFT], c[UPPER_RIGHT], c[LOWER_RIGHT], c[LOWER_LEFT]);
        if left_clipped {
            c[UPPER_LEFT] = ul.lerp(ur, t_left);
            c[LOWER_LEFT] = ll.lerp(lr, t_left);
        }
        if right_clipped {
            c[UPPER_RIGHT] = ul.lerp(ur, t_right);
            c[LOWER_RIGHT] = ll.lerp(lr, t_right);
        }
    }

    let top_clipped = visible.upper_left.y > rect.upper_left.y;
    let bottom_clipped = visible.lower_right.y < rect.lower_right.y;
    if top_clipped || bottom_clipped {
        let t_top = (f64::from(visible.upper_left.y) - top) / span_y;
        let t_bottom = (f64::from(visible.lower_right.y) - top) / span_y;
        let (ul, ur, lr, ll) = (c[UPPER_LEFT], c[UPPER_RIGHT], c[LOWER_RIGHT], c[LOWER_LEFT]);
        if top_clipped {
            c[UPPER_LEFT] = ul.lerp(ll, t_top);
            c[UPPER_RIGHT] = ur.lerp(lr, t_top);
        }
        if bottom_clipped {
            c[LOWER_LEFT] = ul.lerp(ll, t_bottom);
            c[LOWER_RIGHT] = ur.lerp(lr, t_bottom);
        }
    }

    Some((visible, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> Rect {
        Rect::from_xywh(0, 0, 10, 10)
    }

    #[test]
    fn test_point_clip_is_inclusive() {
        assert!(!point_clipped(Point::new(0, 0), &clip()));
        assert!(!point_clipped(Point::new(9, 9), &clip()));
        assert!(point_clipped(Point::new(10, 5), &clip()));
        assert!(point_clipped(Point::new(5, -1), &clip()));
    }

    #[test]
    fn test_inside_line_is_untouched() {
        let l = clip_line(Point::new(1, 2), Point::new(8, 7), &clip()).unwrap();
        assert_eq!(l.start, Point::new(1, 2));
        assert_eq!(l.end, Point::new(8, 7));
        assert_eq!((l.u1, l.u2), (0.0, 1.0));
    }

    #[test]
    fn test_diagonal_clipped_both_ends() {
        let l = clip_line(Point::new(-10, -10), Point::new(10, 10), &clip()).unwrap();
        assert_eq!(l.start, Point::new(0, 0));
        assert_eq!(l.end, Point::new(9, 9));
        assert!((l.u1 - 0.5).abs() < 1e-9);
        assert!((l.u2 - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_missing_line_is_rejected() {
        // Passes above the top-left corner
        assert!(clip_line(Point::new(-5, 3), Point::new(3, -5), &clip()).is_none());
        // Parallel and outside
        assert!(clip_line(Point::new(-3, 0), Point::new(-3, 9), &clip()).is_none());
    }

    #[test]
    fn test_trivial_reject() {
        let c = clip();
        assert!(line_trivially_outside(Point::new(11, 0), Point::new(20, 9), &c));
        assert!(line_trivially_outside(Point::new(0, -1), Point::new(9, -7), &c));
        assert!(!line_trivially_outside(Point::new(-5, 5), Point::new(20, 5), &c));
    }

    #[test]
    fn test_colors_follow_clip_fractions() {
        let l = clip_line(Point::new(-10, 0), Point::new(10, 0), &clip()).unwrap();
        let (from, to) = l.colors(Color::new(0, 0, 0, 255), Color::new(200, 0, 0, 255));
        // u1 = 0.5 -> halfway
        assert_eq!(from.to_color().r, 100);
        // u2 = 19 / 20
        assert_eq!(to.to_color().r, 190);
    }

    #[test]
    fn test_unclipped_rect_keeps_corners() {
        let corners = [
            Color::rgb(1, 0, 0),
            Color::rgb(2, 0, 0),
            Color::rgb(3, 0, 0),
            Color::rgb(4, 0, 0),
        ];
        let rect = Rect::from_xywh(2, 2, 4, 4);
        let (visible, c) = clip_rect_gradient(&rect, corners, &clip()).unwrap();
        assert_eq!(visible, rect);
        assert_eq!(c.map(FixedColor::to_color), corners);
    }

    #[test]
    fn test_left_clip_moves_left_corners() {
        // 11 pixels wide, red ramps 0 -> 200 left to right
        let black = Color::rgb(0, 0, 0);
        let red = Color::rgb(200, 0, 0);
        let rect = Rect::from_xywh(-5, 0, 11, 5);
        let (visible, c) = clip_rect_gradient(&rect, [black, red, red, black], &clip()).unwrap();
        assert_eq!(visible.upper_left.x, 0);
        assert_eq!(c[UPPER_LEFT].to_color().r, 100);
        assert_eq!(c[LOWER_LEFT].to_color().r, 100);
        assert_eq!(c[UPPER_RIGHT].to_color().r, 200);
    }

    #[test]
    fn test_bottom_clip_moves_bottom_corners() {
        let top = Color::rgb(0, 0, 0);
        let bottom = Color::rgb(0, 0, 100);
        let rect = Rect::from_xywh(0, 5, 3, 11);
        let (visible, c) = clip_rect_gradient(&rect, [top, top, bottom, bottom], &clip()).unwrap();
        assert_eq!(visible.lower_right.y, 9);
        assert_eq!(c[LOWER_LEFT].to_color().b, 40);
        assert_eq!(c[LOWER_RIGHT].to_color().b, 40);
        assert_eq!(c[UPPER_LEFT].to_color().b, 0);
    }

    #[test]
    fn test_far_line_clips_without_overflow() {
        let l = clip_line(
            Point::new(-2_000_000_000, -2_000_000_000),
            Point::new(2_000_000_000, 2_000_000_000),
            &clip(),
        )
        .unwrap();
        assert_eq!(l.start, Point::new(0, 0));
        assert_eq!(l.end, Point::new(9, 9));

        let (lo, hi) = (i32::MIN, i32::MAX);
        let l = clip_line(Point::new(lo, 5), Point::new(hi, 4), &clip()).unwrap();
        assert_eq!(l.start.x, 0);
        assert_eq!(l.end.x, 9);
        assert!(clip_line(Point::new(lo, lo), Point::new(hi, lo), &clip()).is_none());
    }

    #[test]
    fn test_full_range_gradient_rect() {
        let black = Color::rgb(0, 0, 0);
        let red = Color::rgb(254, 0, 0);
        let rect = Rect::new(Point::new(i32::MIN, 0), Point::new(i32::MAX, 5));
        let (visible, c) = clip_rect_gradient(&rect, [black, red, red, black], &clip()).unwrap();
        assert_eq!(visible, Rect::from_xywh(0, 0, 10, 6));
        // The canvas sits at the middle of the ramp
        assert_eq!(c[UPPER_LEFT].to_color().r, 127);
        assert_eq!(c[LOWER_RIGHT].to_color().r, 127);
    }

    #[test]
    fn test_rect_outside_clip() {
        let rect = Rect::from_xywh(20, 20, 3, 3);
        assert!(clip_rect_gradient(&rect, [Color::BLACK; 4], &clip()).is_none());
    }
}
