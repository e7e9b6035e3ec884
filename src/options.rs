//! Canvas configuration
//!
//! A serializable description of a canvas, so hosts can keep canvas setup in
//! JSON next to the rest of their configuration.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::blend::BlendMode;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::Result;
use crate::geometry::Rect;

/// Default canvas width
pub const DEFAULT_WIDTH: u32 = 320;

/// Default canvas height
pub const DEFAULT_HEIGHT: u32 = 240;

/// Settings used to build a [`Canvas`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasOptions {
    pub width: u32,
    pub height: u32,
    pub blend_mode: BlendMode,
    /// Initial scissor; the whole canvas when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scissor: Option<Rect>,
    /// Initial fill; transparent black when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_color: Option<Color>,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            blend_mode: BlendMode::default(),
            scissor: None,
            clear_color: None,
        }
    }
}

impl CanvasOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse options from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save options to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Create a canvas with these settings
    pub fn build(&self) -> Result<Canvas> {
        let mut canvas = Canvas::new(self.width, self.height)?;
        if let Some(color) = self.clear_color {
            canvas.fill(color);
        }
        if let Some(scissor) = self.scissor {
            canvas.set_scissor(scissor)?;
        }
        canvas.set_blend_mode(self.blend_mode);
        debug!("built canvas from options {:?}", self);
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CanvasError;
    use crate::geometry::Point;

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts = CanvasOptions::from_json(r#"{ "width": 64 }"#).unwrap();
        assert_eq!(opts.width, 64);
        assert_eq!(opts.height, DEFAULT_HEIGHT);
        assert_eq!(opts.blend_mode, BlendMode::Alpha);
        assert_eq!(opts.scissor, None);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "width": 16,
            "height": 8,
            "blend_mode": "multiply",
            "scissor": {
                "upper_left": { "x": 2, "y": 1 },
                "lower_right": { "x": 9, "y": 6 }
            },
            "clear_color": { "r": 1, "g": 2, "b": 3, "a": 4 }
        }"#;
        let opts = CanvasOptions::from_json(json).unwrap();
        assert_eq!(opts.blend_mode, BlendMode::Multiply);
        assert_eq!(opts.scissor, Some(Rect::new(Point::new(2, 1), Point::new(9, 6))));

        let canvas = opts.build().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (16, 8));
        assert_eq!(canvas.blend_mode(), BlendMode::Multiply);
        assert_eq!(canvas.scissor(), Rect::from_xywh(2, 1, 8, 6));
        assert_eq!(canvas.get_pixel(15, 7), Some(Color::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_unknown_blend_mode_rejected() {
        let err = CanvasOptions::from_json(r#"{ "blend_mode": "screen" }"#).unwrap_err();
        assert!(matches!(err, CanvasError::Options(_)));
    }

    #[test]
    fn test_build_rejects_bad_scissor() {
        let mut opts = CanvasOptions::new(4, 4);
        opts.scissor = Some(Rect::from_xywh(2, 2, 4, 4));
        assert!(matches!(opts.build(), Err(CanvasError::InvalidScissor(_))));

        opts.width = 0;
        assert!(matches!(opts.build(), Err(CanvasError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_save_and_load() {
        let name = format!("softcanvas-opts-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let mut opts = CanvasOptions::new(10, 20);
        opts.blend_mode = BlendMode::Add;
        opts.clear_color = Some(Color::BLACK);

        opts.save(&path).unwrap();
        let loaded = CanvasOptions::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, opts);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CanvasOptions::load("/nonexistent/softcanvas.json").unwrap_err();
        assert!(matches!(err, CanvasError::Io(_)));
    }
}
