//! Composition: arranging finished tiles into one artifact.
//!
//! Both modes consume [`CompositionEntry`](crate::types::CompositionEntry)
//! values strictly in the order given and place entry `i` in grid cell
//! `(i % columns, i / columns)`.
//!
//! | Mode | Type | Output |
//! |---|---|---|
//! | Concatenated raster | [`RasterComposer`] | one `RgbImage` tiling every entry |
//! | HTML grid | [`HtmlComposer`] | `images/*.png`, `styles.css`, `index.html` |

pub mod html;
pub mod raster;

pub use html::{HtmlComposer, HtmlOutput};
pub use raster::RasterComposer;

use crate::imaging::BackendError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image backend error: {0}")]
    Backend(#[from] BackendError),
}
