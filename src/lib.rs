//! # Code Atlas
//!
//! Turns source files into a visual map. Every character becomes a small
//! block of pixels (foreground for code, background for whitespace), so each
//! file renders as its own silhouette. The silhouettes are then tiled into a
//! single PNG or laid out on an HTML page with hover-to-reveal file names.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Load      locations  →  [SourceDocument]   (filesystem or GitHub)
//! 2. Render    document   →  RgbImage           (one per file, in parallel)
//! 3. Process   RgbImage   →  tile               (bounded resize + border)
//! 4. Compose   [tile]     →  atlas.png | out/index.html
//! ```
//!
//! Stages 2 and 3 are pure functions of their input and configuration. Only
//! loading and composition touch the outside world, and composition does so
//! through the [`imaging::ImageBackend`] trait so layout logic can be tested
//! without encoding a single PNG.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`loader`] | `DocumentLoader` trait, filesystem walker, GitHub contents API client |
//! | [`imaging`] | Renderer, post-processor, pure geometry, PNG backend |
//! | [`compose`] | Concatenated-raster and HTML-grid composition |
//! | [`pipeline`] | Orchestration: parallel render, ordering, progress events |
//! | [`config`] | `atlas.toml` loading, validation, merging, stock config |
//! | [`types`] | Shared types passed between stages |
//! | [`naming`] | Display id → image filename, label, relative URL |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Bit-for-bit Reproducible Geometry
//!
//! Points are painted as inclusive rectangles, one pixel wider and taller than
//! their advance, and the tile border only shows on the top and left edges.
//! Both are quirks, and both are kept: existing atlases compare pixel for
//! pixel against new renders. The geometry lives in
//! [`imaging::calculations`] as pure functions so each rule has a unit test.
//!
//! ## Maud for the Grid Page
//!
//! The HTML page is generated with [Maud](https://maud.lambda.xyz/). Display
//! ids come from file paths and repository listings, so auto-escaping matters
//! here more than anywhere else. The stylesheet is a separate `styles.css`
//! next to the page.
//!
//! ## Degrade Per Document, Fail Per Run
//!
//! A file that cannot be read or is not UTF-8 is rendered as a blank tile with
//! a warning; one broken file never aborts a thousand-file atlas. Invalid
//! configuration and failed artifact writes abort the whole run.

pub mod compose;
pub mod config;
pub mod imaging;
pub mod loader;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod types;
