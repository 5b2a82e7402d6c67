//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Documents
//! 001 src/main.rs (42 lines)
//! 002 src/lib.rs (0 lines, empty)
//!
//! Loaded 2 documents
//! ```
//!
//! ## Html / Concat
//!
//! ```text
//! Rendering 2 documents
//!     001 main.rs (42 lines): 200x1000 → 101x501
//!     002 lib.rs (0 lines): 200x1000 → 101x501
//! index.html → out/index.html
//! styles.css → out/styles.css
//! Wrote 2 images to out/images
//! ```
//!
//! Render lines are printed as workers finish, so their order may differ
//! from the index order.
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::naming;
use crate::pipeline::{ComposeSummary, PipelineEvent};
use crate::types::SourceDocument;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

fn format_size((width, height): (u32, u32)) -> String {
    format!("{width}x{height}")
}

// ============================================================================
// Check: loaded documents
// ============================================================================

/// Format the document inventory produced by the loaders.
pub fn format_load_output(documents: &[SourceDocument]) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];
    for (i, doc) in documents.iter().enumerate() {
        let id = doc
            .display_id
            .as_deref()
            .unwrap_or(naming::UNNAMED_DISPLAY_NAME);
        let count = plural(doc.line_count(), "line");
        if doc.content.is_empty() {
            lines.push(format!("{} {} ({}, empty)", format_index(i + 1), id, count));
        } else {
            lines.push(format!("{} {} ({})", format_index(i + 1), id, count));
        }
    }
    lines.push(String::new());
    lines.push(format!("Loaded {}", plural(documents.len(), "document")));
    lines
}

/// Print the document inventory to stdout.
pub fn print_load_output(documents: &[SourceDocument]) {
    for line in format_load_output(documents) {
        println!("{}", line);
    }
}

// ============================================================================
// Html / Concat: progress and result
// ============================================================================

/// Format a single pipeline progress event as display lines.
pub fn format_pipeline_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::Loaded { count } => {
            vec![format!("Rendering {}", plural(*count, "document"))]
        }
        PipelineEvent::Rendered {
            index,
            display_id,
            lines,
            rendered,
            tile,
        } => vec![format!(
            "{}{} {} ({}): {} \u{2192} {}",
            indent(1),
            format_index(index + 1),
            naming::display_name(display_id.as_deref()),
            plural(*lines, "line"),
            format_size(*rendered),
            format_size(*tile),
        )],
        PipelineEvent::Composed(summary) => format_compose_summary(summary),
    }
}

/// Format the artifact paths written by a finished run.
pub fn format_compose_summary(summary: &ComposeSummary) -> Vec<String> {
    match summary {
        ComposeSummary::Html { entries, output } => {
            let images_dir = output
                .index
                .parent()
                .unwrap_or(Path::new(""))
                .join(naming::IMAGES_DIR);
            vec![
                format!("index.html \u{2192} {}", output.index.display()),
                format!("styles.css \u{2192} {}", output.stylesheet.display()),
                format!(
                    "Wrote {} to {}",
                    plural(*entries, "image"),
                    images_dir.display()
                ),
            ]
        }
        ComposeSummary::Raster {
            entries,
            path,
            dimensions,
        } => vec![format!(
            "Composed {} \u{2192} {} ({})",
            plural(*entries, "tile"),
            path.display(),
            format_size(*dimensions)
        )],
    }
}

/// Print a pipeline event to stdout.
pub fn print_pipeline_event(event: &PipelineEvent) {
    for line in format_pipeline_event(event) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::HtmlOutput;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn load_output_lists_documents() {
        let docs = vec![
            SourceDocument::new("fn a() {}\nfn b() {}\n", "src/lib.rs"),
            SourceDocument::blank("src/bad.rs"),
            SourceDocument::unnamed("x"),
        ];
        let lines = format_load_output(&docs);
        assert_eq!(
            lines,
            vec![
                "Documents",
                "001 src/lib.rs (2 lines)",
                "002 src/bad.rs (0 lines, empty)",
                "003 unnamed (1 line)",
                "",
                "Loaded 3 documents",
            ]
        );
    }

    #[test]
    fn load_output_empty() {
        let lines = format_load_output(&[]);
        assert_eq!(lines.last().unwrap(), "Loaded 0 documents");
    }

    #[test]
    fn loaded_event() {
        let lines = format_pipeline_event(&PipelineEvent::Loaded { count: 1 });
        assert_eq!(lines, vec!["Rendering 1 document"]);
    }

    #[test]
    fn rendered_event_uses_short_name() {
        let lines = format_pipeline_event(&PipelineEvent::Rendered {
            index: 4,
            display_id: Some("src/main/java/Main.java".to_string()),
            lines: 10,
            rendered: (200, 1000),
            tile: (101, 501),
        });
        assert_eq!(lines, vec!["    005 Main.java (10 lines): 200x1000 \u{2192} 101x501"]);
    }

    #[test]
    fn rendered_event_unnamed() {
        let lines = format_pipeline_event(&PipelineEvent::Rendered {
            index: 0,
            display_id: None,
            lines: 0,
            rendered: (1, 1),
            tile: (2, 2),
        });
        assert!(lines[0].contains("001 unnamed"));
    }

    #[test]
    fn html_summary_lists_artifacts() {
        let summary = ComposeSummary::Html {
            entries: 2,
            output: HtmlOutput {
                index: PathBuf::from("out/index.html"),
                stylesheet: PathBuf::from("out/styles.css"),
                images: vec![
                    PathBuf::from("out/images/a.png"),
                    PathBuf::from("out/images/b.png"),
                ],
            },
        };
        assert_eq!(
            format_compose_summary(&summary),
            vec![
                "index.html \u{2192} out/index.html",
                "styles.css \u{2192} out/styles.css",
                "Wrote 2 images to out/images",
            ]
        );
    }

    #[test]
    fn raster_summary() {
        let summary = ComposeSummary::Raster {
            entries: 12,
            path: PathBuf::from("atlas.png"),
            dimensions: (1010, 1002),
        };
        assert_eq!(
            format_pipeline_event(&PipelineEvent::Composed(summary)),
            vec!["Composed 12 tiles \u{2192} atlas.png (1010x1002)"]
        );
    }
}
