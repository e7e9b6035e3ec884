//! Midpoint circles
//!
//! One octant is walked with integer error terms and reflected into the
//! other seven. Outlines plot the reflected points; filled circles draw one
//! horizontal span per row. Every point and span is clipped on its own, so a
//! circle hanging off the scissor still draws its visible part.

use std::f64::consts::FRAC_PI_2;

use log::trace;

use super::Canvas;
use crate::blend::{FixedColor, GradientBlendFn, SolidBlendFn, FIXED_SHIFT};
use crate::clip::point_clipped;
use crate::color::Color;
use crate::geometry::{Point, Rect};

const FIXED_ONE: f64 = (1 << FIXED_SHIFT) as f64;

/// How each circle pixel is colored: one color, or a radial ramp from the
/// center color to the edge color
struct Paint {
    center: Color,
    edge: Color,
    radius: f64,
    solid: SolidBlendFn,
    gradient: GradientBlendFn,
}

impl Paint {
    /// Blend the paint for offset (dx, dy) from the center onto `dst`
    #[inline]
    fn apply(&self, dst: Color, dx: i32, dy: i32) -> Color {
        if self.center == self.edge {
            (self.solid)(dst, self.center)
        } else {
            (self.gradient)(dst, self.radial(dx, dy))
        }
    }

    /// `edge - (edge - center) * sin((1 - dist / r) * pi/2)`
    fn radial(&self, dx: i32, dy: i32) -> FixedColor {
        // Rounded octant points can land just past the radius
        let dist = f64::from(dx).hypot(f64::from(dy)).min(self.radius);
        let factor = ((1.0 - dist / self.radius) * FRAC_PI_2).sin();
        let mix = |c0: u8, c1: u8| {
            let c1 = f64::from(c1);
            ((c1 - (c1 - f64::from(c0)) * factor) * FIXED_ONE).round() as i32
        };
        FixedColor {
            r: mix(self.center.r, self.edge.r),
            g: mix(self.center.g, self.edge.g),
            b: mix(self.center.b, self.edge.b),
            a: mix(self.center.a, self.edge.a),
        }
    }
}

impl Canvas {
    /// Draw a circle of `radius` around `center`.
    ///
    /// `colors[0]` is used at the center and `colors[1]` at the edge; when
    /// they differ the circle gets a radial gradient. Non-positive radii and
    /// circles entirely outside the scissor draw nothing.
    pub fn draw_circle(&mut self, center: Point, radius: i32, filled: bool, colors: [Color; 2]) {
        if radius <= 0 {
            trace!("circle with radius {} ignored", radius);
            return;
        }

        let bbox = Rect::new(
            Point::new(center.x.saturating_sub(radius), center.y.saturating_sub(radius)),
            Point::new(center.x.saturating_add(radius), center.y.saturating_add(radius)),
        );
        if !bbox.overlaps(&self.scissor) {
            trace!("circle at {:?} outside scissor", center);
            return;
        }

        let paint = Paint {
            center: colors[0],
            edge: colors[1],
            radius: f64::from(radius),
            solid: self.blend_mode.solid(),
            gradient: self.blend_mode.gradient(),
        };

        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            if filled {
                self.circle_span(center, x, y, &paint);
                if y != 0 {
                    self.circle_span(center, x, -y, &paint);
                }
                // Rows at +-x get their widest span on the last step before x shrinks
                if err >= 0 && x != y {
                    self.circle_span(center, y, x, &paint);
                    self.circle_span(center, y, -x, &paint);
                }
            } else if y == 0 {
                self.circle_point(center, x, 0, &paint);
                self.circle_point(center, -x, 0, &paint);
                self.circle_point(center, 0, x, &paint);
                self.circle_point(center, 0, -x, &paint);
            } else if x == y {
                self.circle_point(center, x, x, &paint);
                self.circle_point(center, -x, x, &paint);
                self.circle_point(center, x, -x, &paint);
                self.circle_point(center, -x, -x, &paint);
            } else {
                for (dx, dy) in [(x, y), (y, x)] {
                    self.circle_point(center, dx, dy, &paint);
                    self.circle_point(center, -dx, dy, &paint);
                    self.circle_point(center, dx, -dy, &paint);
                    self.circle_point(center, -dx, -dy, &paint);
                }
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Filled circle in a single color
    pub fn fill_circle(&mut self, center: Point, radius: i32, color: Color) {
        self.draw_circle(center, radius, true, [color; 2]);
    }

    fn circle_point(&mut self, center: Point, dx: i32, dy: i32, paint: &Paint) {
        let p = Point::new(center.x.saturating_add(dx), center.y.saturating_add(dy));
        if point_clipped(p, &self.scissor) {
            return;
        }
        let idx = self.index(p.x, p.y);
        self.pixels[idx] = paint.apply(self.pixels[idx], dx, dy);
    }

    /// Span of half-width `half` on row `center.y + dy`, clipped to the scissor
    fn circle_span(&mut self, center: Point, half: i32, dy: i32, paint: &Paint) {
        let s = self.scissor;
        let y = center.y.saturating_add(dy);
        if y < s.upper_left.y || y > s.lower_right.y {
            return;
        }
        let x0 = center.x.saturating_sub(half).max(s.upper_left.x);
        let x1 = center.x.saturating_add(half).min(s.lower_right.x);
        if x0 > x1 {
            return;
        }

        let start = self.index(x0, y);
        let len = (x1 - x0) as usize + 1;
        for (px, x) in self.pixels[start..start + len].iter_mut().zip(x0..) {
            *px = paint.apply(*px, x - center.x, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::blend::BlendMode;
    use crate::color::Color;
    use crate::geometry::{Point, Rect};
    use crate::Canvas;

    const BASE: Color = Color::new(1, 2, 3, 255);
    const BUMP: Color = Color::new(10, 0, 0, 0);

    fn canvas(w: u32, h: u32, mode: BlendMode) -> Canvas {
        let mut c = Canvas::new(w, h).unwrap();
        c.fill(BASE);
        c.set_blend_mode(mode);
        c
    }

    fn touched(c: &Canvas) -> Vec<(i32, i32)> {
        (0..c.height() as i32)
            .flat_map(|y| (0..c.width() as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| c.get_pixel(x, y) != Some(BASE))
            .collect()
    }

    #[test]
    fn test_non_positive_radius_is_noop() {
        let mut c = canvas(8, 8, BlendMode::Replace);
        c.draw_circle(Point::new(4, 4), 0, true, [Color::WHITE; 2]);
        c.draw_circle(Point::new(4, 4), -3, false, [Color::WHITE; 2]);
        assert!(touched(&c).is_empty());
    }

    #[test]
    fn test_filled_rows_blend_once() {
        let mut c = canvas(9, 9, BlendMode::Add);
        c.draw_circle(Point::new(4, 4), 3, true, [BUMP; 2]);
        let hit = touched(&c);
        // Row half-widths 3, 3, 2, 1 outward from the center row
        assert_eq!(hit.len(), 7 + 2 * 7 + 2 * 5 + 2 * 3);
        for &(x, y) in &hit {
            assert_eq!(c.get_pixel(x, y).unwrap().r, 11, "({x}, {y})");
        }
    }

    #[test]
    fn test_filled_radius_one_is_plus() {
        let mut c = canvas(3, 3, BlendMode::Replace);
        c.fill_circle(Point::new(1, 1), 1, Color::WHITE);
        assert_eq!(touched(&c), vec![(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_outline_points_blend_once() {
        let mut c = canvas(9, 9, BlendMode::Add);
        c.draw_circle(Point::new(4, 4), 3, false, [BUMP; 2]);
        let hit = touched(&c);
        assert_eq!(hit.len(), 16);
        for &(x, y) in &hit {
            assert_eq!(c.get_pixel(x, y).unwrap().r, 11, "({x}, {y})");
        }
        for p in [(7, 4), (1, 4), (4, 7), (4, 1)] {
            assert!(hit.contains(&p), "{p:?}");
        }
        assert_eq!(c.get_pixel(4, 4), Some(BASE));
    }

    #[test]
    fn test_outline_stays_near_radius() {
        let mut c = canvas(31, 31, BlendMode::Replace);
        let r = 12;
        c.draw_circle(Point::new(15, 15), r, false, [Color::WHITE; 2]);
        for (x, y) in touched(&c) {
            let d = f64::from((x - 15).pow(2) + (y - 15).pow(2)).sqrt();
            assert!(d <= f64::from(r) + 1.0, "({x}, {y}) at {d}");
            assert!(d >= f64::from(r) - 1.0, "({x}, {y}) at {d}");
        }
    }

    #[test]
    fn test_radial_gradient_center_and_edge() {
        let inner = Color::new(200, 0, 0, 255);
        let outer = Color::new(0, 0, 200, 255);
        let mut c = canvas(21, 21, BlendMode::Replace);
        c.draw_circle(Point::new(10, 10), 8, true, [inner, outer]);
        assert_eq!(c.get_pixel(10, 10), Some(inner));
        assert_eq!(c.get_pixel(18, 10), Some(outer));
        assert_eq!(c.get_pixel(10, 2), Some(outer));

        // sin((1 - 4/8) * pi/2) ~ 0.707
        let mid = c.get_pixel(14, 10).unwrap();
        assert!((mid.r as i32 - 141).abs() <= 1, "{mid:?}");
        assert!((mid.b as i32 - 58).abs() <= 1, "{mid:?}");
    }

    #[test]
    fn test_clipped_circle_draws_visible_part() {
        let mut c = canvas(10, 10, BlendMode::Replace);
        let scissor = Rect::from_xywh(0, 0, 5, 5);
        c.set_scissor(scissor).unwrap();
        c.draw_circle(Point::new(0, 0), 4, true, [Color::WHITE; 2]);
        let hit = touched(&c);
        assert!(hit.contains(&(0, 0)));
        assert!(hit.contains(&(4, 0)));
        assert!(hit
            .iter()
            .all(|&(x, y)| scissor.contains_point(Point::new(x, y))));
    }

    #[test]
    fn test_circle_outside_scissor_is_noop() {
        let mut c = canvas(10, 10, BlendMode::Replace);
        c.set_scissor(Rect::from_xywh(0, 0, 4, 4)).unwrap();
        c.draw_circle(Point::new(8, 8), 2, true, [Color::WHITE; 2]);
        c.draw_circle(Point::new(i32::MAX, 0), 5, false, [Color::WHITE; 2]);
        assert!(touched(&c).is_empty());
    }
}
