//! Thumbnail reduction and border for rendered bitmaps.
//!
//! Every tile goes through the same two steps before layout: shrink to fit the
//! thumbnail bound (never enlarge), then sit on a border-colored canvas that is
//! `border_width` pixels larger on each axis.

use super::calculations::{bordered_dimensions, thumbnail_dimensions};
use super::params::{Color, LayoutConfig};
use crate::config::ConfigError;
use image::RgbImage;
use image::imageops::{self, FilterType};

#[derive(Debug, Clone)]
pub struct BitmapPostProcessor {
    bound: (u32, u32),
    border_color: Color,
    border_width: u32,
}

impl BitmapPostProcessor {
    pub fn new(layout: &LayoutConfig) -> Result<Self, ConfigError> {
        layout.validate()?;
        Ok(Self {
            bound: layout.thumbnail_bound,
            border_color: layout.border_color,
            border_width: layout.border_width,
        })
    }

    /// Resize then border. Consumes the bitmap; returns it untouched in size
    /// when it already fits.
    pub fn process(&self, bitmap: RgbImage) -> RgbImage {
        let resized = fit_within(bitmap, self.bound);
        add_border(&resized, self.border_color, self.border_width)
    }
}

/// Shrink `bitmap` to fit `bound`, keeping its aspect ratio.
///
/// Uses Catmull-Rom (bicubic) resampling.
pub fn fit_within(bitmap: RgbImage, bound: (u32, u32)) -> RgbImage {
    match thumbnail_dimensions(bitmap.dimensions(), bound) {
        Some((width, height)) => imageops::resize(&bitmap, width, height, FilterType::CatmullRom),
        None => bitmap,
    }
}

/// Paste `bitmap` at `(border, border)` on a canvas `border` pixels larger.
///
/// The canvas only grows by `border` per axis, so the visible border is on the
/// top and left edges. Existing atlases depend on this exact geometry.
pub fn add_border(bitmap: &RgbImage, color: Color, border: u32) -> RgbImage {
    let (width, height) = bordered_dimensions(bitmap.dimensions(), border);
    let mut bordered = RgbImage::from_pixel(width, height, color);
    imageops::replace(&mut bordered, bitmap, i64::from(border), i64::from(border));
    bordered
}
