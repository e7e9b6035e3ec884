//! Error types for softcanvas.

use thiserror::Error;

use crate::geometry::Rect;

/// Result type alias using CanvasError.
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Errors reported by canvas operations.
///
/// Clipping a draw to nothing is not an error; draws simply do nothing.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Width or height is zero, or the canvas would not be addressable.
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Initial pixel data does not match width * height.
    #[error("Pixel buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Pixel ({x}, {y}) is outside the canvas")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Pixel index {index} is outside the canvas ({len} pixels)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Scissor must be a valid rectangle inside the canvas.
    #[error("Scissor rectangle {0:?} does not fit the canvas")]
    InvalidScissor(Rect),

    #[error("Unknown blend mode value: {0}")]
    InvalidBlendMode(i32),

    /// A pixel buffer could not be allocated.
    #[error("Out of memory allocating {pixels} pixels")]
    OutOfMemory { pixels: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid canvas options: {0}")]
    Options(#[from] serde_json::Error),
}
