use clap::{Parser, Subcommand};
use code_atlas::config::{self, AtlasConfig};
use code_atlas::output;
use code_atlas::pipeline::{self, PipelineConfig, Target};
use code_atlas::types::SourceDocument;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "code-atlas")]
#[command(about = "Render source files as pixel maps and tile them into an atlas")]
#[command(long_about = "\
Render source files as pixel maps and tile them into an atlas

Every character becomes a small block of pixels: code in the foreground
color, whitespace in the background color. Each file becomes one tile, and
the tiles are arranged on a grid.

Outputs:

  code-atlas html src/ -o atlas/       # atlas/index.html + styles.css + images/
  code-atlas concat src/ -o atlas.png  # one PNG with every tile

Locations can be files, directories (walked recursively) or github.com
repository, tree and blob URLs.

Run 'code-atlas gen-config' to generate a documented atlas.toml.")]
#[command(version)]
struct Cli {
    /// Config file [default: ./atlas.toml when present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Shared flags for commands that load documents.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Files, directories or github.com URLs
    #[arg(required = true)]
    locations: Vec<String>,

    /// File-name glob to include; replaces [sources].patterns when given
    #[arg(short = 'p', long = "pattern")]
    patterns: Vec<String>,

    /// Path or file-name glob to skip; adds to [sources].ignore
    #[arg(short = 'i', long = "ignore")]
    ignore: Vec<String>,

    /// Token for private repositories and higher API rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

/// Shared flags for commands that compose an atlas.
#[derive(clap::Args, Clone)]
struct LayoutArgs {
    /// Grid columns; overrides [layout].columns
    #[arg(long)]
    columns: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Write an HTML grid page with one image per file
    Html {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Output directory
        #[arg(short = 'o', long, default_value = "atlas")]
        output: PathBuf,
    },
    /// Write a single PNG tiling every file
    Concat {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Output PNG file
        #[arg(short = 'o', long, default_value = "atlas.png")]
        output: PathBuf,
    },
    /// Load documents and list them without rendering
    Check {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Print a stock atlas.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Html {
            sources,
            layout,
            output,
        } => {
            build(cli.config.as_deref(), &sources, &layout, Target::Html { dir: output })?;
        }
        Command::Concat {
            sources,
            layout,
            output,
        } => {
            build(cli.config.as_deref(), &sources, &layout, Target::Raster { path: output })?;
        }
        Command::Check { sources } => {
            let config = config::load_config_or_default(cli.config.as_deref(), Path::new("."))?;
            let documents = load(&sources, &config)?;
            output::print_load_output(&documents);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load, render and compose into `target`, printing progress as it goes.
fn build(
    config_path: Option<&Path>,
    sources: &SourceArgs,
    layout: &LayoutArgs,
    target: Target,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config::load_config_or_default(config_path, Path::new("."))?;
    if let Some(columns) = layout.columns {
        config.layout.columns = columns;
    }
    let pipeline_config = PipelineConfig::from_config(&config)?;
    init_thread_pool(&config.processing);

    let documents = load(sources, &config)?;

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_pipeline_event(&event);
        }
    });
    let result = pipeline::run(documents, &pipeline_config, &target, Some(tx));
    if printer.join().is_err() {
        log::warn!("progress printer panicked");
    }
    result?;
    Ok(())
}

/// Load documents with CLI patterns layered over the config file.
fn load(
    sources: &SourceArgs,
    config: &AtlasConfig,
) -> Result<Vec<SourceDocument>, pipeline::PipelineError> {
    let patterns = if sources.patterns.is_empty() {
        config.sources.patterns.clone()
    } else {
        sources.patterns.clone()
    };
    let mut ignore = config.sources.ignore.clone();
    ignore.extend(sources.ignore.iter().cloned());

    pipeline::load_documents(
        &sources.locations,
        &patterns,
        &ignore,
        sources.github_token.clone(),
    )
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
