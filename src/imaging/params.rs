//! Typed parameters for rendering and layout.
//!
//! These are the validated, strongly-typed counterparts of the `[render]` and
//! `[layout]` config sections. Everything that touches pixels takes one of
//! these; nothing reads colors or geometry from globals.
//!
//! ## Types
//!
//! - [`CanvasMode`]: fixed canvas, or content-sized with a minimum.
//! - [`RenderConfig`]: point size, colors, tab stop, canvas mode.
//! - [`LayoutConfig`]: grid columns, thumbnail bound, border.

use crate::config::ConfigError;
use image::Rgb;

pub type Color = Rgb<u8>;

/// How the renderer sizes its canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasMode {
    /// Exactly `width × height`; content outside is clipped.
    Fixed { width: u32, height: u32 },
    /// Grows to fit the content, never smaller than the minimum.
    Dynamic { min_width: u32, min_height: u32 },
}

impl CanvasMode {
    fn dimensions(self) -> (u32, u32) {
        match self {
            CanvasMode::Fixed { width, height } => (width, height),
            CanvasMode::Dynamic {
                min_width,
                min_height,
            } => (min_width, min_height),
        }
    }
}

/// Geometry and colors for turning text into points.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub point_width: u32,
    pub point_height: u32,
    pub background: Color,
    pub foreground: Color,
    /// Width of a tab in points, not pixels.
    pub tab_width: u32,
    pub canvas: CanvasMode,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.point_width == 0 || self.point_height == 0 {
            return Err(ConfigError::Validation(
                "render.point_width and render.point_height must be positive".into(),
            ));
        }
        if self.tab_width == 0 {
            return Err(ConfigError::Validation(
                "render.tab_width must be positive".into(),
            ));
        }
        let (w, h) = self.canvas.dimensions();
        if w == 0 || h == 0 {
            return Err(ConfigError::Validation(
                "render.canvas width and height must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Pixel advance of a tab character.
    pub fn tab_advance(&self) -> u32 {
        self.tab_width.saturating_mul(self.point_width)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            point_width: 2,
            point_height: 2,
            background: Rgb([30, 31, 34]),
            foreground: Rgb([188, 190, 196]),
            tab_width: 4,
            canvas: CanvasMode::Fixed {
                width: 200,
                height: 1000,
            },
        }
    }
}

/// Grid arrangement and per-tile post-processing.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub columns: u32,
    /// Largest `(width, height)` a tile may have before its border is added.
    pub thumbnail_bound: (u32, u32),
    pub border_color: Color,
    pub border_width: u32,
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::Validation(
                "layout.columns must be positive".into(),
            ));
        }
        if self.thumbnail_bound.0 == 0 || self.thumbnail_bound.1 == 0 {
            return Err(ConfigError::Validation(
                "layout.thumbnail values must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            thumbnail_bound: (500, 1000),
            border_color: Rgb([0, 0, 0]),
            border_width: 1,
        }
    }
}
