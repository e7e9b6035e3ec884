//! Integer points and inclusive axis-aligned rectangles

use serde::{Deserialize, Serialize};

/// A pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle with inclusive corners.
///
/// A rectangle is valid when `upper_left` is not right of or below
/// `lower_right`. Invalid rectangles have no area and never draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub upper_left: Point,
    pub lower_right: Point,
}

impl Rect {
    /// Canonical "no intersection" result
    pub const INVALID: Rect = Rect::new(Point::new(0, 0), Point::new(-1, -1));

    #[inline]
    pub const fn new(upper_left: Point, lower_right: Point) -> Self {
        Self {
            upper_left,
            lower_right,
        }
    }

    /// Rectangle from an origin and a size; a non-positive size gives an invalid rect.
    /// Edges past `i32::MAX` are cut off there.
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        if width <= 0 || height <= 0 {
            return Rect::INVALID;
        }
        Self::new(
            Point::new(x, y),
            Point::new(x.saturating_add(width - 1), y.saturating_add(height - 1)),
        )
    }

    /// Width in pixels, saturating at `i32::MAX`
    #[inline]
    pub fn width(&self) -> i32 {
        span(self.upper_left.x, self.lower_right.x)
    }

    /// Height in pixels, saturating at `i32::MAX`
    #[inline]
    pub fn height(&self) -> i32 {
        span(self.upper_left.y, self.lower_right.y)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.upper_left.x <= self.lower_right.x && self.upper_left.y <= self.lower_right.y
    }

    /// Overlapping area, or [`Rect::INVALID`] when there is none
    pub fn intersection(&self, other: &Rect) -> Rect {
        if !self.is_valid() || !other.is_valid() {
            return Rect::INVALID;
        }

        let result = Rect::new(
            Point::new(
                self.upper_left.x.max(other.upper_left.x),
                self.upper_left.y.max(other.upper_left.y),
            ),
            Point::new(
                self.lower_right.x.min(other.lower_right.x),
                self.lower_right.y.min(other.lower_right.y),
            ),
        );

        if result.is_valid() {
            result
        } else {
            Rect::INVALID
        }
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.is_valid()
            && other.is_valid()
            && other.upper_left.x >= self.upper_left.x
            && other.upper_left.y >= self.upper_left.y
            && other.lower_right.x <= self.lower_right.x
            && other.lower_right.y <= self.lower_right.y
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.upper_left.x
            && p.x <= self.lower_right.x
            && p.y >= self.upper_left.y
            && p.y <= self.lower_right.y
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.intersection(other).is_valid()
    }

    /// Same size, moved by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            Point::new(
                self.upper_left.x.saturating_add(dx),
                self.upper_left.y.saturating_add(dy),
            ),
            Point::new(
                self.lower_right.x.saturating_add(dx),
                self.lower_right.y.saturating_add(dy),
            ),
        )
    }
}

/// Inclusive pixel count from `lo` to `hi`, saturated into `i32`
#[inline]
fn span(lo: i32, hi: i32) -> i32 {
    let n = i64::from(hi) - i64::from(lo) + 1;
    i32::try_from(n).unwrap_or(if n < 0 { i32::MIN } else { i32::MAX })
}

impl Default for Rect {
    fn default() -> Self {
        Self::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_inclusive() {
        let r = Rect::from_xywh(2, 3, 4, 5);
        assert_eq!(r.lower_right, Point::new(5, 7));
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 5);
        assert!(!Rect::from_xywh(0, 0, 0, 3).is_valid());
    }

    #[test]
    fn test_intersection() {
        let a = Rect::from_xywh(0, 0, 10, 10);
        let b = Rect::from_xywh(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Rect::from_xywh(5, 5, 5, 5));

        let far = Rect::from_xywh(20, 20, 2, 2);
        assert_eq!(a.intersection(&far), Rect::INVALID);
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_intersection_with_invalid_input() {
        let a = Rect::from_xywh(0, 0, 10, 10);
        let bad = Rect::new(Point::new(5, 5), Point::new(2, 2));
        assert!(!a.intersection(&bad).is_valid());
        assert!(!bad.intersection(&a).is_valid());
    }

    #[test]
    fn test_containment() {
        let outer = Rect::from_xywh(0, 0, 10, 10);
        assert!(outer.contains_rect(&Rect::from_xywh(0, 0, 10, 10)));
        assert!(outer.contains_rect(&Rect::from_xywh(3, 3, 2, 2)));
        assert!(!outer.contains_rect(&Rect::from_xywh(8, 8, 3, 3)));
        assert!(!outer.contains_rect(&Rect::INVALID));
        assert!(outer.contains_point(Point::new(9, 9)));
        assert!(!outer.contains_point(Point::new(10, 0)));
    }

    #[test]
    fn test_translate() {
        let r = Rect::from_xywh(1, 1, 2, 2).translate(3, -1);
        assert_eq!(r, Rect::from_xywh(4, 0, 2, 2));
    }

    #[test]
    fn test_extreme_extents_saturate() {
        let wide = Rect::new(Point::new(i32::MIN, 0), Point::new(i32::MAX, 5));
        assert_eq!(wide.width(), i32::MAX);
        assert_eq!(wide.height(), 6);

        let edge = Rect::from_xywh(i32::MAX - 1, 0, 10, 1);
        assert_eq!(edge.lower_right.x, i32::MAX);
        assert_eq!(edge.width(), 2);
        assert!(!Rect::from_xywh(i32::MIN, 0, 0, 1).is_valid());
    }
}
