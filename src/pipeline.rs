//! End-to-end orchestration: documents in, one artifact out.
//!
//! ```text
//! load  →  render + post-process (parallel)  →  order  →  compose
//! ```
//!
//! ## Parallel Processing
//!
//! Each document is rendered and post-processed independently on the rayon
//! pool. Results are collected back in input order before any reordering, so
//! the output never depends on which worker finished first.
//!
//! ## Progress
//!
//! Callers may pass an `mpsc` sender to receive [`PipelineEvent`]s. `Rendered`
//! events arrive in completion order and carry the input index.

use crate::compose::{ComposeError, HtmlComposer, HtmlOutput, RasterComposer};
use crate::config::{AtlasConfig, ConfigError};
use crate::imaging::{
    BackendError, BitmapPostProcessor, ImageBackend, LayoutConfig, RasterRenderer, RenderConfig,
    RustBackend,
};
use crate::loader::{self, DocumentLoader, FileSystemLoader, GitHubLoader, LoadError};
use crate::types::{CompositionEntry, EntryOrder, SourceDocument};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Loading failed: {0}")]
    Load(#[from] LoadError),
    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),
    #[error("Image backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Everything one run needs, already validated into typed form.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub render: RenderConfig,
    pub layout: LayoutConfig,
    pub order: EntryOrder,
}

impl PipelineConfig {
    pub fn from_config(config: &AtlasConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            render: config.render_config()?,
            layout: config.layout_config()?,
            order: config.output.order,
        })
    }
}

/// Where the composed artifact goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `index.html`, `styles.css` and `images/` inside `dir`.
    Html { dir: PathBuf },
    /// A single PNG at `path`.
    Raster { path: PathBuf },
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeSummary {
    Html {
        entries: usize,
        output: HtmlOutput,
    },
    Raster {
        entries: usize,
        path: PathBuf,
        dimensions: (u32, u32),
    },
}

impl ComposeSummary {
    pub fn entries(&self) -> usize {
        match self {
            ComposeSummary::Html { entries, .. } | ComposeSummary::Raster { entries, .. } => {
                *entries
            }
        }
    }
}

/// Progress reported while a run is underway.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Rendering is about to start for `count` documents.
    Loaded { count: usize },
    /// One document rendered and post-processed.
    Rendered {
        /// Position in the input, 0-based.
        index: usize,
        display_id: Option<String>,
        lines: usize,
        /// Bitmap size straight out of the renderer.
        rendered: (u32, u32),
        /// Tile size after thumbnail and border.
        tile: (u32, u32),
    },
    Composed(ComposeSummary),
}

/// Load every location with the matching loader, keeping location order.
///
/// `http(s)://` locations go to the GitHub loader, everything else to the
/// filesystem loader.
pub fn load_documents(
    locations: &[String],
    patterns: &[String],
    ignore: &[String],
    github_token: Option<String>,
) -> Result<Vec<SourceDocument>, PipelineError> {
    let local = FileSystemLoader::new();
    let mut remote: Option<GitHubLoader> = None;
    let mut documents = Vec::new();

    for location in locations {
        let batch = if loader::is_remote(location) {
            let github = match remote.take() {
                Some(github) => github,
                None => GitHubLoader::new(github_token.clone())?,
            };
            let batch = github.load(std::slice::from_ref(location), patterns, ignore);
            remote = Some(github);
            batch?
        } else {
            local.load(std::slice::from_ref(location), patterns, ignore)?
        };
        log::debug!("{location}: {} documents", batch.len());
        documents.extend(batch);
    }
    Ok(documents)
}

/// Run the pipeline with the production PNG backend.
pub fn run(
    documents: Vec<SourceDocument>,
    config: &PipelineConfig,
    target: &Target,
    events: Option<Sender<PipelineEvent>>,
) -> Result<ComposeSummary, PipelineError> {
    run_with_backend(&RustBackend::new(), documents, config, target, events)
}

/// Run the pipeline with a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    documents: Vec<SourceDocument>,
    config: &PipelineConfig,
    target: &Target,
    events: Option<Sender<PipelineEvent>>,
) -> Result<ComposeSummary, PipelineError> {
    let renderer = RasterRenderer::new(config.render.clone())?;
    let post = BitmapPostProcessor::new(&config.layout)?;
    let composer = Composer::new(target, &config.layout)?;

    let emit = |event: PipelineEvent| {
        if let Some(tx) = events.as_ref() {
            tx.send(event).ok();
        }
    };

    emit(PipelineEvent::Loaded {
        count: documents.len(),
    });

    let rendered: Vec<(u32, CompositionEntry)> = documents
        .into_par_iter()
        .enumerate()
        .map(|(index, doc)| {
            let bitmap = renderer.render(&doc);
            let rendered = bitmap.dimensions();
            let tile = post.process(bitmap);
            emit(PipelineEvent::Rendered {
                index,
                display_id: doc.display_id.clone(),
                lines: doc.line_count(),
                rendered,
                tile: tile.dimensions(),
            });
            (rendered.1, CompositionEntry::new(tile, doc.display_id))
        })
        .collect();

    let entries = order_entries(rendered, config.order);
    let summary = composer.compose(backend, &entries)?;
    emit(PipelineEvent::Composed(summary.clone()));
    Ok(summary)
}

/// Apply `order` to `(rendered height, entry)` pairs.
///
/// `Height` is a stable sort, tallest first.
pub fn order_entries(
    mut rendered: Vec<(u32, CompositionEntry)>,
    order: EntryOrder,
) -> Vec<CompositionEntry> {
    if order == EntryOrder::Height {
        rendered.sort_by_key(|(height, _)| Reverse(*height));
    }
    rendered.into_iter().map(|(_, entry)| entry).collect()
}

/// A composer chosen and validated before any rendering starts.
enum Composer<'a> {
    Html(HtmlComposer),
    Raster(RasterComposer, &'a Path),
}

impl<'a> Composer<'a> {
    fn new(target: &'a Target, layout: &LayoutConfig) -> Result<Self, ConfigError> {
        Ok(match target {
            Target::Html { dir } => Composer::Html(HtmlComposer::new(dir, layout)?),
            Target::Raster { path } => Composer::Raster(RasterComposer::new(layout)?, path),
        })
    }

    fn compose(
        &self,
        backend: &impl ImageBackend,
        entries: &[CompositionEntry],
    ) -> Result<ComposeSummary, PipelineError> {
        match self {
            Composer::Html(composer) => {
                let output = composer.compose(backend, entries)?;
                Ok(ComposeSummary::Html {
                    entries: entries.len(),
                    output,
                })
            }
            Composer::Raster(composer, path) => {
                let image = composer.compose(entries);
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(ComposeError::Io)?;
                }
                backend.save_png(&image, path)?;
                Ok(ComposeSummary::Raster {
                    entries: entries.len(),
                    path: path.to_path_buf(),
                    dimensions: image.dimensions(),
                })
            }
        }
    }
}
