//! Concatenated-raster composition.
//!
//! The cell size comes from the first entry. Tiles of a different size are
//! pasted at the same origins anyway, so they overlap or leave gaps; anything
//! past the canvas edge is clipped.

use crate::config::ConfigError;
use crate::imaging::calculations::{cell_origin, grid_dimensions};
use crate::imaging::params::LayoutConfig;
use crate::types::CompositionEntry;
use image::RgbImage;
use image::imageops;

#[derive(Debug, Clone)]
pub struct RasterComposer {
    columns: u32,
}

impl RasterComposer {
    pub fn new(layout: &LayoutConfig) -> Result<Self, ConfigError> {
        layout.validate()?;
        Ok(Self {
            columns: layout.columns,
        })
    }

    /// Tile every entry row-major into one image. No entries gives a 1×1 black image.
    pub fn compose(&self, entries: &[CompositionEntry]) -> RgbImage {
        let Some(first) = entries.first() else {
            return RgbImage::new(1, 1);
        };
        let cell = first.bitmap.dimensions();
        let (width, height) = grid_dimensions(entries.len(), self.columns, cell);
        let mut canvas = RgbImage::new(width, height);

        for (i, entry) in entries.iter().enumerate() {
            let (x, y) = cell_origin(i, self.columns, cell);
            imageops::replace(&mut canvas, &entry.bitmap, i64::from(x), i64::from(y));
        }
        canvas
    }
}
