//! Image encoding backend trait.
//!
//! Composition never touches an encoder directly: it hands finished bitmaps to
//! an [`ImageBackend`]. The production implementation, [`RustBackend`], encodes
//! PNG with the `image` crate. Tests swap in a recording mock so layout logic
//! can be checked without encoding anything.

use image::{ImageError, ImageFormat, RgbImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding failed for {path}: {message}")]
    Encode { path: String, message: String },
}

pub trait ImageBackend: Sync {
    /// Encode `image` as PNG at `path`, replacing any existing file.
    fn save_png(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError>;
}

/// PNG encoding through the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ImageBackend for RustBackend {
    fn save_png(&self, image: &RgbImage, path: &Path) -> Result<(), BackendError> {
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| match e {
                ImageError::IoError(io) => BackendError::Io(io),
                other => BackendError::Encode {
                    path: path.display().to_string(),
                    message: other.to_string(),
                },
            })
    }
}
