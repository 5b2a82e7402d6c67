//! Shared types that flow between pipeline stages.
//!
//! A [`SourceDocument`] comes out of a loader, the renderer turns it into a
//! bitmap, and the bitmap travels on inside a [`CompositionEntry`]. Bitmaps are
//! moved from stage to stage, never shared.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Raw text of one source file plus an optional label.
///
/// `display_id` is usually a path, but nothing treats it as one except the
/// naming helpers that derive an image filename and a short display name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceDocument {
    pub content: String,
    pub display_id: Option<String>,
}

impl SourceDocument {
    pub fn new(content: impl Into<String>, display_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            display_id: Some(display_id.into()),
        }
    }

    /// A document without a label. Composition falls back to generated names.
    pub fn unnamed(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            display_id: None,
        }
    }

    /// Placeholder for a file that could not be read or decoded.
    ///
    /// Renders as a blank canvas instead of aborting the batch.
    pub fn blank(display_id: impl Into<String>) -> Self {
        Self::new(String::new(), display_id)
    }

    /// Number of lines as the renderer counts them (line endings kept).
    pub fn line_count(&self) -> usize {
        self.content.split_inclusive('\n').count()
    }
}

/// A processed bitmap ready for layout, with the label it came from.
#[derive(Debug, Clone)]
pub struct CompositionEntry {
    pub bitmap: RgbImage,
    pub display_id: Option<String>,
}

impl CompositionEntry {
    pub fn new(bitmap: RgbImage, display_id: Option<String>) -> Self {
        Self { bitmap, display_id }
    }
}

/// Order in which rendered documents are handed to composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrder {
    /// Keep loader order.
    #[default]
    Input,
    /// Tallest rendered bitmap first; ties keep loader order.
    Height,
}
