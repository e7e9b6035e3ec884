//! Canvas storage and drawing state
//!
//! A canvas owns a row-major `width * height` pixel buffer plus the two
//! pieces of state every draw consults: the scissor rectangle and the
//! blend mode. Drawing lives in the submodules:
//! - `draw`: points, lines, rectangles, image blits
//! - `circle`: midpoint circles, outlined or filled, solid or radial
//! - `transform`: whole-buffer operations that ignore the scissor

mod circle;
mod draw;
mod transform;

use std::fmt;

use log::{debug, warn};

use crate::blend::BlendMode;
use crate::color::Color;
use crate::error::{CanvasError, Result};
use crate::geometry::Rect;

/// Empty buffer with room for `len` pixels, reporting failure instead of aborting
fn reserve_pixels(len: usize) -> Result<Vec<Color>> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| CanvasError::OutOfMemory { pixels: len })?;
    Ok(pixels)
}

/// Buffer of `len` pixels set to `fill`
fn alloc_pixels(len: usize, fill: Color) -> Result<Vec<Color>> {
    let mut pixels = reserve_pixels(len)?;
    pixels.resize(len, fill);
    Ok(pixels)
}

/// Pixel count for a width/height pair, rejecting sizes the i32 coordinate
/// space cannot address
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    let invalid = CanvasError::InvalidDimensions { width, height };
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(invalid);
    }
    (width as usize).checked_mul(height as usize).ok_or(invalid)
}

/// Full-canvas rectangle for the given size
fn full_rect(width: u32, height: u32) -> Rect {
    Rect::from_xywh(0, 0, width as i32, height as i32)
}

// ============================================================================
// Canvas
// ============================================================================

/// RGBA pixel buffer with scissor and blend-mode state
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
    scissor: Rect,
    blend_mode: BlendMode,
}

impl Canvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = pixel_count(width, height)?;
        let pixels = alloc_pixels(len, Color::TRANSPARENT)?;
        debug!("created {}x{} canvas", width, height);
        Ok(Self::from_parts(pixels, width, height))
    }

    /// Create a canvas that takes ownership of existing pixels
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(CanvasError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        debug!("created {}x{} canvas from pixels", width, height);
        Ok(Self::from_parts(pixels, width, height))
    }

    /// Create a canvas from decoder output: row-major R, G, B, A bytes
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let count = pixel_count(width, height)?;
        let expected = count
            .checked_mul(4)
            .ok_or(CanvasError::InvalidDimensions { width, height })?;
        if bytes.len() != expected {
            return Err(CanvasError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let mut pixels = reserve_pixels(count)?;
        pixels.extend(
            bytes
                .chunks_exact(4)
                .map(|px| Color::new(px[0], px[1], px[2], px[3])),
        );
        debug!("created {}x{} canvas from rgba bytes", width, height);
        Ok(Self::from_parts(pixels, width, height))
    }

    fn from_parts(pixels: Vec<Color>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
            scissor: full_rect(width, height),
            blend_mode: BlendMode::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rectangle covering the whole canvas
    #[inline]
    pub fn bounds(&self) -> Rect {
        full_rect(self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Row-major R, G, B, A bytes for encoders and texture upload
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Buffer index for (x, y); caller guarantees the point is in bounds
    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    // ========================================================================
    // Pixel Access
    // ========================================================================

    /// Read a pixel; `None` outside the canvas
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Overwrite a pixel. Ignores scissor and blend mode.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        if !self.in_bounds(x, y) {
            return Err(CanvasError::OutOfBounds { x, y });
        }
        let idx = self.index(x, y);
        self.pixels[idx] = color;
        Ok(())
    }

    #[inline]
    pub fn get_pixel_by_index(&self, index: usize) -> Option<Color> {
        self.pixels.get(index).copied()
    }

    pub fn set_pixel_by_index(&mut self, index: usize, color: Color) -> Result<()> {
        let len = self.pixels.len();
        let px = self
            .pixels
            .get_mut(index)
            .ok_or(CanvasError::IndexOutOfBounds { index, len })?;
        *px = color;
        Ok(())
    }

    /// Read a pixel in packed `0xRRGGBBAA` form
    pub fn get_pixel_packed(&self, x: i32, y: i32) -> Option<u32> {
        self.get_pixel(x, y).map(Color::to_packed)
    }

    /// Write a pixel given in packed `0xRRGGBBAA` form
    pub fn set_pixel_packed(&mut self, x: i32, y: i32, packed: u32) -> Result<()> {
        self.set_pixel(x, y, Color::from_packed(packed))
    }

    // ========================================================================
    // Drawing State
    // ========================================================================

    #[inline]
    pub fn scissor(&self) -> Rect {
        self.scissor
    }

    /// Restrict drawing to `rect`, which must be valid and inside the canvas.
    /// On failure the previous scissor stays active.
    pub fn set_scissor(&mut self, rect: Rect) -> Result<()> {
        if !self.bounds().contains_rect(&rect) {
            warn!("rejected scissor {:?} on {}x{} canvas", rect, self.width, self.height);
            return Err(CanvasError::InvalidScissor(rect));
        }
        debug!("scissor set to {:?}", rect);
        self.scissor = rect;
        Ok(())
    }

    /// Scissor back to the whole canvas
    pub fn reset_scissor(&mut self) {
        self.scissor = self.bounds();
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        debug!("blend mode set to {:?}", mode);
        self.blend_mode = mode;
    }

    /// Set the blend mode from its raw value (0 Replace .. 4 Multiply).
    /// Unknown values are rejected and the current mode is kept.
    pub fn set_blend_mode_raw(&mut self, raw: i32) -> Result<()> {
        let mode = BlendMode::try_from(raw).map_err(|err| {
            warn!("rejected blend mode value {}", raw);
            err
        })?;
        self.set_blend_mode(mode);
        Ok(())
    }

    // ========================================================================
    // Reallocation
    // ========================================================================

    /// Copy the part of `rect` that lies on the canvas into a new canvas.
    ///
    /// Returns `Ok(None)` when `rect` misses the canvas entirely.
    pub fn clone_section(&self, rect: Rect) -> Result<Option<Canvas>> {
        let section = rect.intersection(&self.bounds());
        if !section.is_valid() {
            return Ok(None);
        }

        let w = section.width() as usize;
        let h = section.height() as usize;
        let mut pixels = reserve_pixels(w * h)?;

        for row in 0..h as i32 {
            let start = self.index(section.upper_left.x, section.upper_left.y + row);
            pixels.extend_from_slice(&self.pixels[start..start + w]);
        }

        debug!("cloned section {:?}", section);
        Canvas::from_pixels(w as u32, h as u32, pixels).map(Some)
    }

    /// Change the canvas size, keeping the overlapping top-left region.
    ///
    /// Newly exposed pixels are transparent black and the scissor resets to
    /// the full new canvas. On failure the canvas is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let len = pixel_count(width, height)?;
        let mut resized = alloc_pixels(len, Color::TRANSPARENT)?;

        let copy_w = self.width.min(width) as usize;
        let copy_h = self.height.min(height) as usize;
        for row in 0..copy_h {
            let src = row * self.width as usize;
            let dst = row * width as usize;
            resized[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
        }

        debug!(
            "resized canvas {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.replace_buffer(resized, width, height);
        Ok(())
    }

    /// Swap in a reallocated buffer of a new size
    fn replace_buffer(&mut self, pixels: Vec<Color>, width: u32, height: u32) {
        self.pixels = pixels;
        self.width = width;
        self.height = height;
        self.scissor = full_rect(width, height);
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scissor", &self.scissor)
            .field("blend_mode", &self.blend_mode)
            .finish_non_exhaustive()
    }
}
