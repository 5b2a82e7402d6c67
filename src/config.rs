//! Atlas configuration module.
//!
//! Handles loading, validating, and merging `atlas.toml`. Stock defaults are
//! the base layer; a user file only needs the keys it wants to change, and
//! command-line flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [render]
//! point_width = 2           # Pixels per character, horizontally
//! point_height = 2          # Pixels per line
//! background = "#1e1f22"    # Whitespace color
//! foreground = "#bcbec4"    # Everything else
//! tab_width = 4             # Tab stop, in points
//!
//! [render.canvas]
//! mode = "fixed"            # "fixed" or "dynamic"
//! width = 200               # fixed: exact size; dynamic: minimum size
//! height = 1000
//!
//! [layout]
//! columns = 10
//! thumbnail = [500, 1000]   # Max tile size before the border
//! border_color = "#000000"
//! border_width = 1
//!
//! [sources]
//! patterns = ["*.rs"]       # File-name globs to include
//! ignore = []               # Path or file-name globs to skip
//!
//! [output]
//! order = "input"           # "input" or "height" (tallest first)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::params::{CanvasMode, Color, LayoutConfig, RenderConfig};
use crate::types::EntryOrder;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "atlas.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything `atlas.toml` can set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// How each file is turned into a bitmap.
    pub render: RenderSection,
    /// How bitmaps are shrunk, bordered and arranged.
    pub layout: LayoutSection,
    /// Which files are picked up.
    pub sources: SourcesConfig,
    /// Ordering of the final artifact.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl AtlasConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render_config()?;
        self.layout_config()?;
        Ok(())
    }

    /// Typed, validated render settings.
    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        let r = &self.render;
        let canvas = match r.canvas.mode {
            CanvasKind::Fixed => CanvasMode::Fixed {
                width: r.canvas.width,
                height: r.canvas.height,
            },
            CanvasKind::Dynamic => CanvasMode::Dynamic {
                min_width: r.canvas.width,
                min_height: r.canvas.height,
            },
        };
        let config = RenderConfig {
            point_width: r.point_width,
            point_height: r.point_height,
            background: parse_hex_color(&r.background)
                .map_err(|e| ConfigError::Validation(format!("render.background: {e}")))?,
            foreground: parse_hex_color(&r.foreground)
                .map_err(|e| ConfigError::Validation(format!("render.foreground: {e}")))?,
            tab_width: r.tab_width,
            canvas,
        };
        config.validate()?;
        Ok(config)
    }

    /// Typed, validated layout settings.
    pub fn layout_config(&self) -> Result<LayoutConfig, ConfigError> {
        let l = &self.layout;
        let config = LayoutConfig {
            columns: l.columns,
            thumbnail_bound: (l.thumbnail[0], l.thumbnail[1]),
            border_color: parse_hex_color(&l.border_color)
                .map_err(|e| ConfigError::Validation(format!("layout.border_color: {e}")))?,
            border_width: l.border_width,
        };
        config.validate()?;
        Ok(config)
    }
}

/// `[render]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub point_width: u32,
    pub point_height: u32,
    /// Color for spaces, tabs and line breaks.
    pub background: String,
    /// Color for every other character.
    pub foreground: String,
    /// Tab stop width in points.
    pub tab_width: u32,
    pub canvas: CanvasSection,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            point_width: 2,
            point_height: 2,
            background: "#1e1f22".to_string(),
            foreground: "#bcbec4".to_string(),
            tab_width: 4,
            canvas: CanvasSection::default(),
        }
    }
}

/// `[render.canvas]` section.
///
/// `width`/`height` are the exact size for `fixed` and the minimum for `dynamic`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasSection {
    pub mode: CanvasKind,
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            mode: CanvasKind::Fixed,
            width: 200,
            height: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasKind {
    #[default]
    Fixed,
    Dynamic,
}

/// `[layout]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    /// Grid columns, in both the HTML page and the concatenated image.
    pub columns: u32,
    /// Largest tile as `[width, height]` before the border is added.
    pub thumbnail: [u32; 2],
    pub border_color: String,
    pub border_width: u32,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            columns: 10,
            thumbnail: [500, 1000],
            border_color: "#000000".to_string(),
            border_width: 1,
        }
    }
}

/// `[sources]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Globs matched against file names.
    pub patterns: Vec<String>,
    /// Globs matched against relative paths and file names.
    pub ignore: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["*.rs".to_string()],
            ignore: Vec::new(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub order: EntryOrder,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Parse `#rrggbb` or `#rgb` into a color.
pub fn parse_hex_color(value: &str) -> Result<Color, String> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| format!("expected '#rrggbb', got '{value}'"))?;
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()
        .ok_or_else(|| format!("invalid hex digits in '{value}'"))?;
    match digits.as_slice() {
        [r, g, b] => Ok(Rgb([r * 17, g * 17, b * 17])),
        [r1, r2, g1, g2, b1, b2] => Ok(Rgb([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2])),
        _ => Err(format!("expected 3 or 6 hex digits, got '{value}'")),
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(AtlasConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AtlasConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AtlasConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a config file on top of stock defaults.
///
/// The file must exist. Unknown keys and invalid values are errors.
pub fn load_config(path: &Path) -> Result<AtlasConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value()?, Some(overlay))
}

/// Load an explicit config file, or `atlas.toml` from `dir` if present, or defaults.
pub fn load_config_or_default(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<AtlasConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let implicit = dir.join(CONFIG_FILENAME);
    if implicit.exists() {
        log::debug!("Using config {}", implicit.display());
        return load_config(&implicit);
    }
    Ok(AtlasConfig::default())
}

/// Returns a fully-commented stock `atlas.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Code Atlas Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Command-line flags override these values: --columns and --pattern replace,
# --ignore adds to the list below.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Rendering: one bitmap per source file
# ---------------------------------------------------------------------------
[render]
# Size of one character ("point") in pixels.
point_width = 2
point_height = 2

# Whitespace (space, tab, line break) is painted in the background color,
# every other character in the foreground color.
background = "#1e1f22"
foreground = "#bcbec4"

# Tab stop width, in points.
tab_width = 4

[render.canvas]
# "fixed": every bitmap is exactly width x height, long files are clipped.
# "dynamic": bitmaps grow to fit their content, width x height is the minimum.
mode = "fixed"
width = 200
height = 1000

# ---------------------------------------------------------------------------
# Layout: thumbnails, border, grid
# ---------------------------------------------------------------------------
[layout]
# Columns in the HTML grid and the concatenated image.
columns = 10

# Bitmaps larger than [width, height] are shrunk to fit, keeping aspect ratio.
thumbnail = [500, 1000]

# Border added on the top and left of every tile.
border_color = "#000000"
border_width = 1

# ---------------------------------------------------------------------------
# Sources
# ---------------------------------------------------------------------------
[sources]
# File-name globs to include when walking a directory or repository.
patterns = ["*.rs"]

# Globs for paths or file names to skip (directories are pruned).
ignore = []

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# "input": keep discovery order. "height": tallest rendered file first.
order = "input"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
