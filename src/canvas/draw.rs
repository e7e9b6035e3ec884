//! Points, lines, rectangles and image blits
//!
//! Every primitive clips against the scissor before touching the buffer, so
//! the inner loops index without further checks. The blend function is
//! looked up once per primitive from the active mode.

use log::trace;

use super::Canvas;
use crate::blend::{BlendMode, FixedColor};
use crate::clip::{
    clip_line, clip_rect_gradient, line_trivially_outside, point_clipped, LOWER_LEFT,
    LOWER_RIGHT, UPPER_LEFT, UPPER_RIGHT,
};
use crate::color::Color;
use crate::geometry::{Point, Rect};

/// `|b - a|` for coordinates that may be far off the canvas, saturated into i32
#[inline]
fn distance(a: i32, b: i32) -> i32 {
    i32::try_from((i64::from(b) - i64::from(a)).abs()).unwrap_or(i32::MAX)
}

impl Canvas {
    /// Blend a single pixel if it passes the scissor test
    pub fn draw_point(&mut self, p: Point, color: Color) {
        if point_clipped(p, &self.scissor) {
            return;
        }
        let idx = self.index(p.x, p.y);
        self.pixels[idx] = self.blend_mode.blend(self.pixels[idx], color);
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Draw a line from `p0` to `p1`, both endpoints included.
    ///
    /// Equal colors draw solid; otherwise the color ramps from `c0` at `p0`
    /// to `c1` at `p1` in 20.12 fixed point.
    pub fn draw_line(&mut self, p0: Point, p1: Point, c0: Color, c1: Color) {
        if line_trivially_outside(p0, p1, &self.scissor) {
            trace!("line {:?}-{:?} outside scissor", p0, p1);
            return;
        }

        if p0.y == p1.y {
            self.hline(p0.x, p1.x, p0.y, c0, c1);
        } else if p0.x == p1.x {
            self.vline(p0.x, p0.y, p1.y, c0, c1);
        } else {
            self.line_diagonal(p0, p1, c0, c1);
        }
    }

    /// Horizontal fast path: clamp both ends to the scissor and walk from
    /// `x0` toward `x1`. Caller has rejected lines entirely off one side.
    fn hline(&mut self, x0: i32, x1: i32, y: i32, c0: Color, c1: Color) {
        let s = self.scissor;
        if y < s.upper_left.y || y > s.lower_right.y {
            return;
        }
        let start = x0.clamp(s.upper_left.x, s.lower_right.x);
        let end = x1.clamp(s.upper_left.x, s.lower_right.x);
        let dir = if x0 <= x1 { 1 } else { -1 };
        let count = (end - start).abs() + 1;

        let mut idx = self.index(start, y) as isize;
        if c0 == c1 {
            let blend = self.blend_mode.solid();
            for _ in 0..count {
                let i = idx as usize;
                self.pixels[i] = blend(self.pixels[i], c0);
                idx += dir as isize;
            }
        } else {
            let blend = self.blend_mode.gradient();
            let step = FixedColor::step(c0.into(), c1.into(), distance(x0, x1));
            let mut color = FixedColor::from_color(c0).advanced(step, distance(x0, start));
            for _ in 0..count {
                let i = idx as usize;
                self.pixels[i] = blend(self.pixels[i], color);
                color += step;
                idx += dir as isize;
            }
        }
    }

    /// Vertical fast path, same contract as [`Canvas::hline`]
    fn vline(&mut self, x: i32, y0: i32, y1: i32, c0: Color, c1: Color) {
        let s = self.scissor;
        if x < s.upper_left.x || x > s.lower_right.x {
            return;
        }
        let start = y0.clamp(s.upper_left.y, s.lower_right.y);
        let end = y1.clamp(s.upper_left.y, s.lower_right.y);
        let stride = if y0 <= y1 {
            self.width as isize
        } else {
            -(self.width as isize)
        };
        let count = (end - start).abs() + 1;

        let mut idx = self.index(x, start) as isize;
        if c0 == c1 {
            let blend = self.blend_mode.solid();
            for _ in 0..count {
                let i = idx as usize;
                self.pixels[i] = blend(self.pixels[i], c0);
                idx += stride;
            }
        } else {
            let blend = self.blend_mode.gradient();
            let step = FixedColor::step(c0.into(), c1.into(), distance(y0, y1));
            let mut color = FixedColor::from_color(c0).advanced(step, distance(y0, start));
            for _ in 0..count {
                let i = idx as usize;
                self.pixels[i] = blend(self.pixels[i], color);
                color += step;
                idx += stride;
            }
        }
    }

    /// Liang-Barsky clip, then Bresenham over the visible segment
    fn line_diagonal(&mut self, p0: Point, p1: Point, c0: Color, c1: Color) {
        let Some(clipped) = clip_line(p0, p1, &self.scissor) else {
            trace!("line {:?}-{:?} clipped away", p0, p1);
            return;
        };

        let (x_end, y_end) = (clipped.end.x, clipped.end.y);
        let dx = (x_end - clipped.start.x).abs();
        let dy = -(y_end - clipped.start.y).abs();
        let sx = if clipped.start.x < x_end { 1 } else { -1 };
        let sy = if clipped.start.y < y_end { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = clipped.start.x;
        let mut y = clipped.start.y;

        // One color step per major-axis pixel
        let (mut color, step) = if c0 == c1 {
            (FixedColor::from_color(c0), FixedColor::default())
        } else {
            let (from, to) = clipped.colors(c0, c1);
            (from, FixedColor::step(from, to, dx.max(-dy)))
        };
        let solid = self.blend_mode.solid();
        let gradient = self.blend_mode.gradient();

        loop {
            let idx = self.index(x, y);
            self.pixels[idx] = if c0 == c1 {
                solid(self.pixels[idx], c0)
            } else {
                gradient(self.pixels[idx], color)
            };
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            color += step;
        }
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Fill `rect` with one color per corner: upper-left, upper-right,
    /// lower-right, lower-left. Four equal colors fill solid; otherwise the
    /// colors are interpolated bilinearly across the rectangle.
    pub fn draw_rect(&mut self, rect: Rect, colors: [Color; 4]) {
        if !rect.is_valid() {
            return;
        }

        if colors.iter().all(|&c| c == colors[0]) {
            self.fill_rect_solid(rect, colors[0]);
        } else {
            self.fill_rect_gradient(rect, colors);
        }
    }

    /// Fill `rect` with a single color
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_rect(rect, [color; 4]);
    }

    fn fill_rect_solid(&mut self, rect: Rect, color: Color) {
        let visible = rect.intersection(&self.scissor);
        if !visible.is_valid() {
            trace!("rect {:?} outside scissor", rect);
            return;
        }

        let blend = self.blend_mode.solid();
        let w = visible.width() as usize;
        for y in visible.upper_left.y..=visible.lower_right.y {
            let start = self.index(visible.upper_left.x, y);
            for px in &mut self.pixels[start..start + w] {
                *px = blend(*px, color);
            }
        }
    }

    fn fill_rect_gradient(&mut self, rect: Rect, colors: [Color; 4]) {
        let Some((visible, corners)) = clip_rect_gradient(&rect, colors, &self.scissor) else {
            trace!("gradient rect {:?} outside scissor", rect);
            return;
        };

        let blend = self.blend_mode.gradient();
        let w = visible.width();
        let h = visible.height();
        for row in 0..h {
            let left = corners[UPPER_LEFT].lerp_ratio(corners[LOWER_LEFT], row, h - 1);
            let right = corners[UPPER_RIGHT].lerp_ratio(corners[LOWER_RIGHT], row, h - 1);
            let step = FixedColor::step(left, right, w - 1);

            let start = self.index(visible.upper_left.x, visible.upper_left.y + row);
            let mut color = left;
            for px in &mut self.pixels[start..start + w as usize] {
                *px = blend(*px, color);
                color += step;
            }
        }
    }

    /// Outline `rect` one pixel wide; each corner is blended once
    pub fn draw_rect_outline(&mut self, rect: Rect, color: Color) {
        if !rect.is_valid() {
            return;
        }
        let Rect {
            upper_left: ul,
            lower_right: lr,
        } = rect;

        self.draw_line(ul, Point::new(lr.x, ul.y), color, color);
        if lr.y > ul.y {
            self.draw_line(Point::new(ul.x, lr.y), lr, color, color);
        }
        if lr.y > ul.y.saturating_add(1) {
            let (top, bottom) = (ul.y + 1, lr.y - 1);
            self.draw_line(Point::new(ul.x, top), Point::new(ul.x, bottom), color, color);
            if lr.x > ul.x {
                self.draw_line(Point::new(lr.x, top), Point::new(lr.x, bottom), color, color);
            }
        }
    }

    // ========================================================================
    // Image Blits
    // ========================================================================

    /// Blend all of `src` onto this canvas with its top-left at `dst`
    pub fn draw_image(&mut self, src: &Canvas, dst: Point) {
        self.draw_sub_image(src, src.bounds(), dst);
    }

    /// Blend the `src_rect` part of `src` onto this canvas with its top-left
    /// at `dst`. `src_rect` must lie inside `src`; otherwise nothing is drawn.
    pub fn draw_sub_image(&mut self, src: &Canvas, src_rect: Rect, dst: Point) {
        if !src.bounds().contains_rect(&src_rect) {
            trace!("source rect {:?} not inside source canvas", src_rect);
            return;
        }

        let target = Rect::from_xywh(dst.x, dst.y, src_rect.width(), src_rect.height())
            .intersection(&self.scissor);
        if !target.is_valid() {
            trace!("image at {:?} outside scissor", dst);
            return;
        }

        // Shift the source by however much the destination lost on the top/left
        let src_x = src_rect.upper_left.x + (target.upper_left.x - dst.x);
        let src_y = src_rect.upper_left.y + (target.upper_left.y - dst.y);
        let w = target.width() as usize;
        let replace = self.blend_mode == BlendMode::Replace;
        let blend = self.blend_mode.solid();

        for row in 0..target.height() {
            let si = src.index(src_x, src_y + row);
            let di = self.index(target.upper_left.x, target.upper_left.y + row);
            let src_row = &src.pixels[si..si + w];
            let dst_row = &mut self.pixels[di..di + w];
            if replace {
                dst_row.copy_from_slice(src_row);
            } else {
                for (d, &s) in dst_row.iter_mut().zip(src_row) {
                    *d = blend(*d, s);
                }
            }
        }
    }
}
