//! Whole-buffer operations
//!
//! These ignore both the scissor and the blend mode.

use log::debug;

use super::{alloc_pixels, Canvas};
use crate::color::Color;
use crate::error::Result;

impl Canvas {
    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Set the alpha channel of every pixel, leaving RGB alone
    pub fn set_alpha(&mut self, alpha: u8) {
        for px in &mut self.pixels {
            px.a = alpha;
        }
    }

    /// Replace R, G and B with their average; alpha is kept
    pub fn grey(&mut self) {
        for px in &mut self.pixels {
            let avg = ((u16::from(px.r) + u16::from(px.g) + u16::from(px.b)) / 3) as u8;
            px.r = avg;
            px.g = avg;
            px.b = avg;
        }
    }

    /// Replace every pixel exactly equal to `from`, alpha included
    pub fn replace_color(&mut self, from: Color, to: Color) {
        for px in self.pixels.iter_mut().filter(|px| **px == from) {
            *px = to;
        }
    }

    // ========================================================================
    // Flips
    // ========================================================================

    /// Mirror left to right
    pub fn flip_horizontally(&mut self) {
        for row in self.pixels.chunks_exact_mut(self.width as usize) {
            row.reverse();
        }
    }

    /// Mirror top to bottom
    pub fn flip_vertically(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        for top in 0..h / 2 {
            let bottom = h - 1 - top;
            let (upper, lower) = self.pixels.split_at_mut(bottom * w);
            upper[top * w..(top + 1) * w].swap_with_slice(&mut lower[..w]);
        }
    }

    // ========================================================================
    // Rotation
    // ========================================================================

    /// Rotate 90 degrees clockwise. Width and height swap and the scissor
    /// resets to the whole canvas.
    pub fn rotate_cw(&mut self) -> Result<()> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut rotated = alloc_pixels(self.pixels.len(), Color::TRANSPARENT)?;

        // (x, y) -> (h - 1 - y, x) in a buffer h wide
        for (y, row) in self.pixels.chunks_exact(w).enumerate() {
            for (x, &px) in row.iter().enumerate() {
                rotated[x * h + (h - 1 - y)] = px;
            }
        }

        debug!("rotated {}x{} canvas clockwise", self.width, self.height);
        self.replace_buffer(rotated, self.height, self.width);
        Ok(())
    }

    /// Rotate 90 degrees counter-clockwise. Width and height swap and the
    /// scissor resets to the whole canvas.
    pub fn rotate_ccw(&mut self) -> Result<()> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut rotated = alloc_pixels(self.pixels.len(), Color::TRANSPARENT)?;

        // (x, y) -> (y, w - 1 - x) in a buffer h wide
        for (y, row) in self.pixels.chunks_exact(w).enumerate() {
            for (x, &px) in row.iter().enumerate() {
                rotated[(w - 1 - x) * h + y] = px;
            }
        }

        debug!("rotated {}x{} canvas counter-clockwise", self.width, self.height);
        self.replace_buffer(rotated, self.height, self.width);
        Ok(())
    }
}
