//! HTML-grid composition.
//!
//! Writes one PNG per entry plus a page that lays them out on a CSS grid:
//!
//! ```text
//! out/
//! ├── index.html      # grid container, one grid item per entry
//! ├── styles.css      # grid with `columns` equal tracks, hover labels
//! └── images/
//!     ├── Main.png
//!     └── image_1.png  # entry without a display id
//! ```
//!
//! Each grid item shows its image and a label (the last path segment of the
//! display id) that fades in on hover. The full display id travels in a
//! `data-original-filename` attribute.
//!
//! Files are written one after another in entry order, so two entries that
//! map to the same image name leave the later one on disk.

use super::ComposeError;
use crate::config::ConfigError;
use crate::imaging::ImageBackend;
use crate::imaging::params::LayoutConfig;
use crate::naming;
use crate::types::CompositionEntry;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::PathBuf;

pub const INDEX_FILENAME: &str = "index.html";
pub const STYLESHEET_FILENAME: &str = "styles.css";

/// Paths written by one [`HtmlComposer::compose`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOutput {
    pub index: PathBuf,
    pub stylesheet: PathBuf,
    /// One per entry, in entry order. Repeats when names collide.
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct HtmlComposer {
    output_dir: PathBuf,
    columns: u32,
}

/// One grid cell as it appears in the page.
struct GridItem<'a> {
    href: String,
    display_id: Option<&'a str>,
    label: String,
}

impl HtmlComposer {
    pub fn new(output_dir: impl Into<PathBuf>, layout: &LayoutConfig) -> Result<Self, ConfigError> {
        layout.validate()?;
        Ok(Self {
            output_dir: output_dir.into(),
            columns: layout.columns,
        })
    }

    /// Write images, stylesheet and page. Any write failure aborts the call.
    pub fn compose(
        &self,
        backend: &impl ImageBackend,
        entries: &[CompositionEntry],
    ) -> Result<HtmlOutput, ComposeError> {
        let images_dir = self.output_dir.join(naming::IMAGES_DIR);
        fs::create_dir_all(&images_dir)?;

        let mut images = Vec::with_capacity(entries.len());
        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let display_id = entry.display_id.as_deref();
            let filename = naming::image_filename(display_id, index);
            let path = images_dir.join(&filename);
            backend.save_png(&entry.bitmap, &path)?;
            log::debug!("Wrote {}", path.display());

            items.push(GridItem {
                href: naming::image_href(&filename),
                display_id,
                label: naming::display_name(display_id),
            });
            images.push(path);
        }

        let stylesheet = self.output_dir.join(STYLESHEET_FILENAME);
        fs::write(&stylesheet, stylesheet_css(self.columns))?;

        let index = self.output_dir.join(INDEX_FILENAME);
        fs::write(&index, render_page(&items).into_string())?;

        Ok(HtmlOutput {
            index,
            stylesheet,
            images,
        })
    }
}

/// Grid stylesheet with `columns` equal tracks.
pub fn stylesheet_css(columns: u32) -> String {
    format!(
        r#".grid-container {{
    display: grid;
    grid-template-columns: repeat({columns}, 1fr);
    gap: 2px;
    padding: 2px;
}}

.grid-item {{
    position: relative;
    border: 1px solid #ddd;
    padding: 2px;
    transition: all 0.3s ease;
}}

.filename {{
    position: absolute;
    bottom: 10px;
    left: 10px;
    background: rgba(0, 0, 0, 0.8);
    color: white;
    padding: 5px 10px;
    font-family: Arial, sans-serif;
    font-size: 20px;
    border-radius: 3px;
    opacity: 0;
    transition: opacity 0.3s ease;
    pointer-events: none;
    z-index: 2;
}}

.grid-item:hover .filename {{
    opacity: 1;
}}

img {{
    width: 100%;
    height: auto;
    display: block;
    position: relative;
    z-index: 1;
}}
"#
    )
}

fn render_page(items: &[GridItem]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Code Atlas" }
                link rel="stylesheet" href=(STYLESHEET_FILENAME);
            }
            body {
                div.grid-container {
                    @for item in items {
                        (render_grid_item(item))
                    }
                }
            }
        }
    }
}

fn render_grid_item(item: &GridItem) -> Markup {
    html! {
        div.grid-item {
            img src=(item.href) alt=[item.display_id];
            div.filename data-original-filename=[item.display_id] {
                (item.label)
            }
        }
    }
}
