//! Bitmap production: pure Rust, pixels in memory.
//!
//! | Step | Function |
//! |---|---|
//! | **Render** | [`RasterRenderer::render`]: text → points → bitmap |
//! | **Thumbnail** | [`postprocess::fit_within`]: bounded Catmull-Rom downscale |
//! | **Border** | [`postprocess::add_border`]: top/left border canvas |
//! | **Encode** | [`ImageBackend::save_png`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for geometry (unit testable)
//! - **Parameters**: Validated render and layout settings
//! - **Render / Postprocess**: Pixel work on `image::RgbImage`
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod calculations;
pub mod params;
pub mod postprocess;
pub mod render;

pub use backend::{BackendError, ImageBackend, RustBackend};
pub use params::{CanvasMode, Color, LayoutConfig, RenderConfig};
pub use postprocess::BitmapPostProcessor;
pub use render::RasterRenderer;
