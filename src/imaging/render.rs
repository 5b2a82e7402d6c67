//! Text → bitmap rendering.
//!
//! Every character becomes a filled rectangle ("point"): whitespace in the
//! background color, everything else in the foreground color. There is no
//! font, no glyph shape and no antialiasing; the result is the silhouette of
//! the source file.
//!
//! ## Point geometry
//!
//! A point painted at `(x, y)` covers `x..=x + point_width` and
//! `y..=y + point_height`, inclusive on both ends. Neighbouring points
//! therefore overlap by one pixel and the later one wins. This is kept as-is so
//! renders stay pixel-identical with existing atlases.

use super::calculations::{canvas_size, plan_points};
use super::params::{Color, RenderConfig};
use crate::config::ConfigError;
use crate::types::SourceDocument;
use image::RgbImage;

/// Renders documents with one fixed [`RenderConfig`].
///
/// Holds no mutable state, so a single renderer can be shared across rayon
/// workers.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    config: RenderConfig,
}

impl RasterRenderer {
    /// Create a renderer, rejecting non-positive geometry up front.
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a document onto a fresh canvas.
    ///
    /// Empty content is valid input and produces a blank background canvas;
    /// loaders use it for files they could not read.
    pub fn render(&self, doc: &SourceDocument) -> RgbImage {
        let (width, height) = canvas_size(&doc.content, &self.config);
        let mut canvas = RgbImage::from_pixel(width, height, self.config.background);

        for point in plan_points(&doc.content, &self.config) {
            let color = if point.blank {
                self.config.background
            } else {
                self.config.foreground
            };
            fill_point(
                &mut canvas,
                point.x,
                point.y,
                self.config.point_width,
                self.config.point_height,
                color,
            );
        }

        canvas
    }
}

/// Fill the inclusive rectangle `(x, y)..=(x + w, y + h)`, clipped to the canvas.
fn fill_point(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Color) {
    let (canvas_w, canvas_h) = canvas.dimensions();
    if x >= canvas_w || y >= canvas_h {
        return;
    }
    let x_end = x.saturating_add(w).min(canvas_w - 1);
    let y_end = y.saturating_add(h).min(canvas_h - 1);
    for py in y..=y_end {
        for px in x..=x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}
