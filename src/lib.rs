//! Software 2D rasterizer and pixel compositor.
//!
//! A [`Canvas`] is an owned RGBA pixel buffer with a scissor rectangle and a
//! [`BlendMode`]. Lines, rectangles, circles and image blits are clipped to
//! the scissor and composited with the active mode; gradients are stepped in
//! 20.12 fixed point. Whole-buffer transforms (fill, flips, rotations,
//! resize) work on the full buffer.
//!
//! ```
//! use softcanvas::{BlendMode, Canvas, Color, Point, Rect};
//!
//! let mut canvas = Canvas::new(64, 48)?;
//! canvas.fill(Color::BLACK);
//! canvas.set_scissor(Rect::from_xywh(8, 8, 48, 32))?;
//! canvas.set_blend_mode(BlendMode::Add);
//! canvas.draw_line(Point::new(0, 0), Point::new(63, 47), Color::WHITE, Color::rgb(255, 0, 0));
//! canvas.draw_circle(Point::new(32, 24), 10, true, [Color::WHITE, Color::BLACK]);
//!
//! assert_eq!(canvas.get_pixel(0, 0), Some(Color::BLACK));
//! # Ok::<(), softcanvas::CanvasError>(())
//! ```

pub mod blend;
pub mod canvas;
pub mod clip;
pub mod color;
pub mod error;
pub mod geometry;
pub mod options;
#[cfg(feature = "sdl")]
pub mod present;

pub use blend::{BlendMode, FixedColor};
pub use canvas::Canvas;
pub use color::Color;
pub use error::{CanvasError, Result};
pub use geometry::{Point, Rect};
pub use options::CanvasOptions;
