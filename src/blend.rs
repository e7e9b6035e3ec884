//! Per-pixel compositing
//!
//! Every blend mode has a solid variant, applying one 8-bit color, and a
//! gradient variant, applying a color carried in 20.12 fixed point so that
//! rasterizers can step colors without floating point in the inner loop.
//! Both variants share the same integer arithmetic; the gradient one reads
//! its source channel as `value >> 12`.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::CanvasError;

/// Fractional bits of a fixed-point channel
pub const FIXED_SHIFT: u32 = 12;

/// Color with 20.12 fixed-point channels.
///
/// Channels may drift slightly outside 0..=255 while stepping; they are
/// clamped when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
    pub a: i32,
}

impl FixedColor {
    #[inline]
    pub const fn from_color(c: Color) -> Self {
        Self {
            r: (c.r as i32) << FIXED_SHIFT,
            g: (c.g as i32) << FIXED_SHIFT,
            b: (c.b as i32) << FIXED_SHIFT,
            a: (c.a as i32) << FIXED_SHIFT,
        }
    }

    #[inline]
    pub fn to_color(self) -> Color {
        Color::new(
            channel(self.r) as u8,
            channel(self.g) as u8,
            channel(self.b) as u8,
            channel(self.a) as u8,
        )
    }

    /// Per-pixel increment that walks `from` to `to` in `steps` steps
    pub fn step(from: FixedColor, to: FixedColor, steps: i32) -> Self {
        let steps = steps.max(1);
        let delta = |a: i32, b: i32| (b - a) / steps;
        Self {
            r: delta(from.r, to.r),
            g: delta(from.g, to.g),
            b: delta(from.b, to.b),
            a: delta(from.a, to.a),
        }
    }

    /// `self + step * n`, used to skip ahead over clipped pixels
    #[inline]
    pub fn advanced(self, step: FixedColor, n: i32) -> Self {
        Self {
            r: self.r + step.r * n,
            g: self.g + step.g * n,
            b: self.b + step.b * n,
            a: self.a + step.a * n,
        }
    }

    /// Linear interpolation, `t` in 0.0..=1.0, rounded half up
    pub fn lerp(self, other: FixedColor, t: f64) -> Self {
        let mix = |a: i32, b: i32| a + ((b - a) as f64 * t + 0.5).floor() as i32;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// `self + (other - self) * num / den`, exact in integer arithmetic
    pub fn lerp_ratio(self, other: FixedColor, num: i32, den: i32) -> Self {
        if den == 0 {
            return self;
        }
        let mix = |a: i32, b: i32| a + ((b - a) as i64 * num as i64 / den as i64) as i32;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl std::ops::AddAssign for FixedColor {
    #[inline]
    fn add_assign(&mut self, step: FixedColor) {
        self.r += step.r;
        self.g += step.g;
        self.b += step.b;
        self.a += step.a;
    }
}

impl From<Color> for FixedColor {
    fn from(c: Color) -> Self {
        Self::from_color(c)
    }
}

/// Integer channel value of a fixed-point channel
#[inline]
fn channel(v: i32) -> i32 {
    (v >> FIXED_SHIFT).clamp(0, 255)
}

// ============================================================================
// Blend Mode
// ============================================================================

/// Compositing rule applied when a primitive writes a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// dst = src, alpha included
    Replace,
    /// dst = (dst * (256 - sa) + src * (sa + 1)) >> 8
    #[default]
    Alpha,
    /// dst = min(dst + src, 255)
    Add,
    /// dst = max(dst - src, 0)
    Subtract,
    /// dst = (dst * (src + 1)) >> 8
    Multiply,
}

/// Solid-color compositing function
pub type SolidBlendFn = fn(Color, Color) -> Color;

/// Fixed-point gradient compositing function
pub type GradientBlendFn = fn(Color, FixedColor) -> Color;

impl BlendMode {
    pub const ALL: [BlendMode; 5] = [
        BlendMode::Replace,
        BlendMode::Alpha,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::Multiply,
    ];

    /// Function for solid draws; look it up once per primitive, not per pixel
    pub fn solid(self) -> SolidBlendFn {
        match self {
            BlendMode::Replace => replace,
            BlendMode::Alpha => alpha,
            BlendMode::Add => add,
            BlendMode::Subtract => subtract,
            BlendMode::Multiply => multiply,
        }
    }

    /// Function for gradient draws
    pub fn gradient(self) -> GradientBlendFn {
        match self {
            BlendMode::Replace => replace_fixed,
            BlendMode::Alpha => alpha_fixed,
            BlendMode::Add => add_fixed,
            BlendMode::Subtract => subtract_fixed,
            BlendMode::Multiply => multiply_fixed,
        }
    }

    #[inline]
    pub fn blend(self, dst: Color, src: Color) -> Color {
        (self.solid())(dst, src)
    }

    #[inline]
    pub fn blend_fixed(self, dst: Color, src: FixedColor) -> Color {
        (self.gradient())(dst, src)
    }
}

impl TryFrom<i32> for BlendMode {
    type Error = CanvasError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BlendMode::Replace),
            1 => Ok(BlendMode::Alpha),
            2 => Ok(BlendMode::Add),
            3 => Ok(BlendMode::Subtract),
            4 => Ok(BlendMode::Multiply),
            other => Err(CanvasError::InvalidBlendMode(other)),
        }
    }
}

impl From<BlendMode> for i32 {
    fn from(mode: BlendMode) -> Self {
        mode as i32
    }
}

// ============================================================================
// Channel Arithmetic
// ============================================================================

#[inline]
fn alpha_channel(dst: u8, src: i32, sa: i32) -> u8 {
    ((dst as i32 * (256 - sa) + src * (sa + 1)) >> 8) as u8
}

#[inline]
fn add_channel(dst: u8, src: i32) -> u8 {
    (dst as i32 + src).min(255) as u8
}

#[inline]
fn subtract_channel(dst: u8, src: i32) -> u8 {
    (dst as i32 - src).max(0) as u8
}

#[inline]
fn multiply_channel(dst: u8, src: i32) -> u8 {
    ((dst as i32 * (src + 1)) >> 8) as u8
}

// ============================================================================
// Solid Variants
// ============================================================================

fn replace(_dst: Color, src: Color) -> Color {
    src
}

fn alpha(dst: Color, src: Color) -> Color {
    let sa = src.a as i32;
    Color::new(
        alpha_channel(dst.r, src.r as i32, sa),
        alpha_channel(dst.g, src.g as i32, sa),
        alpha_channel(dst.b, src.b as i32, sa),
        dst.a,
    )
}

fn add(dst: Color, src: Color) -> Color {
    Color::new(
        add_channel(dst.r, src.r as i32),
        add_channel(dst.g, src.g as i32),
        add_channel(dst.b, src.b as i32),
        dst.a,
    )
}

fn subtract(dst: Color, src: Color) -> Color {
    Color::new(
        subtract_channel(dst.r, src.r as i32),
        subtract_channel(dst.g, src.g as i32),
        subtract_channel(dst.b, src.b as i32),
        dst.a,
    )
}

fn multiply(dst: Color, src: Color) -> Color {
    Color::new(
        multiply_channel(dst.r, src.r as i32),
        multiply_channel(dst.g, src.g as i32),
        multiply_channel(dst.b, src.b as i32),
        dst.a,
    )
}

// ============================================================================
// Gradient Variants
// ============================================================================

fn replace_fixed(_dst: Color, src: FixedColor) -> Color {
    src.to_color()
}

fn alpha_fixed(dst: Color, src: FixedColor) -> Color {
    let sa = channel(src.a);
    Color::new(
        alpha_channel(dst.r, channel(src.r), sa),
        alpha_channel(dst.g, channel(src.g), sa),
        alpha_channel(dst.b, channel(src.b), sa),
        dst.a,
    )
}

fn add_fixed(dst: Color, src: FixedColor) -> Color {
    Color::new(
        add_channel(dst.r, channel(src.r)),
        add_channel(dst.g, channel(src.g)),
        add_channel(dst.b, channel(src.b)),
        dst.a,
    )
}

fn subtract_fixed(dst: Color, src: FixedColor) -> Color {
    Color::new(
        subtract_channel(dst.r, channel(src.r)),
        subtract_channel(dst.g, channel(src.g)),
        subtract_channel(dst.b, channel(src.b)),
        dst.a,
    )
}

fn multiply_fixed(dst: Color, src: FixedColor) -> Color {
    Color::new(
        multiply_channel(dst.r, channel(src.r)),
        multiply_channel(dst.g, channel(src.g)),
        multiply_channel(dst.b, channel(src.b)),
        dst.a,
    )
}
