//! End-to-end runs: real files on disk, real PNG encoding.

use code_atlas::config::{self, AtlasConfig};
use code_atlas::imaging::{CanvasMode, LayoutConfig, RenderConfig};
use code_atlas::pipeline::{self, ComposeSummary, PipelineConfig, Target};
use code_atlas::types::{EntryOrder, SourceDocument};
use image::Rgb;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BACKGROUND: Rgb<u8> = Rgb([30, 31, 34]);
const FOREGROUND: Rgb<u8> = Rgb([188, 190, 196]);
const BORDER: Rgb<u8> = Rgb([0, 0, 0]);

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/main.rs", "fn main() {\n\tprintln!(\"hi\");\n}\n");
    write(tmp.path(), "src/lib.rs", "pub mod a;\n");
    write(tmp.path(), "src/a.rs", "x\n");
    write(tmp.path(), "target/debug/build.rs", "// generated\n");
    write(tmp.path(), "README.md", "# project\n");
    tmp
}

fn small_config() -> PipelineConfig {
    PipelineConfig {
        render: RenderConfig {
            canvas: CanvasMode::Fixed {
                width: 40,
                height: 20,
            },
            ..RenderConfig::default()
        },
        layout: LayoutConfig {
            columns: 2,
            ..LayoutConfig::default()
        },
        order: EntryOrder::Input,
    }
}

fn load(root: &Path) -> Vec<SourceDocument> {
    pipeline::load_documents(
        &[root.to_string_lossy().to_string()],
        &["*.rs".to_string()],
        &["target".to_string()],
        None,
    )
    .unwrap()
}

fn pixel_digest(path: &Path) -> Vec<u8> {
    let image = image::open(path).unwrap().to_rgb8();
    Sha256::digest(image.as_raw()).to_vec()
}

#[test]
fn concat_writes_tiled_png() {
    let tmp = project();
    let out = TempDir::new().unwrap();
    let path = out.path().join("atlas.png");

    let documents = load(tmp.path());
    assert_eq!(documents.len(), 3);

    let summary = pipeline::run(
        documents,
        &small_config(),
        &Target::Raster { path: path.clone() },
        None,
    )
    .unwrap();

    // 40x20 tiles + 1px border, 2 columns, 2 rows
    assert!(matches!(
        summary,
        ComposeSummary::Raster {
            entries: 3,
            dimensions: (82, 42),
            ..
        }
    ));

    let atlas = image::open(&path).unwrap().to_rgb8();
    assert_eq!(atlas.dimensions(), (82, 42));
    // Border along the top-left of the first tile
    assert_eq!(*atlas.get_pixel(0, 0), BORDER);
    // Walk order is a.rs, lib.rs, main.rs; "x" paints a foreground point at (1, 1)
    assert_eq!(*atlas.get_pixel(1, 1), FOREGROUND);
    // Past the end of "x\n" the canvas is background
    assert_eq!(*atlas.get_pixel(30, 10), BACKGROUND);
    // Fourth cell is empty
    assert_eq!(*atlas.get_pixel(60, 30), Rgb([0, 0, 0]));
}

#[test]
fn concat_is_reproducible() {
    let tmp = project();
    let out = TempDir::new().unwrap();
    let first = out.path().join("first.png");
    let second = out.path().join("second.png");

    for path in [&first, &second] {
        pipeline::run(
            load(tmp.path()),
            &small_config(),
            &Target::Raster { path: path.clone() },
            None,
        )
        .unwrap();
    }

    assert_eq!(pixel_digest(&first), pixel_digest(&second));
}

#[test]
fn html_writes_page_stylesheet_and_images() {
    let tmp = project();
    let out = TempDir::new().unwrap();
    let dir = out.path().join("site");

    let summary = pipeline::run(
        load(tmp.path()),
        &small_config(),
        &Target::Html { dir: dir.clone() },
        None,
    )
    .unwrap();
    assert_eq!(summary.entries(), 3);

    let html = fs::read_to_string(dir.join("index.html")).unwrap();
    assert_eq!(html.matches(r#"class="grid-item""#).count(), 3);
    assert!(html.contains(r#"src="images/main.png""#));
    assert!(html.contains(">main.rs<"));
    assert!(!html.contains("build.png"));

    let css = fs::read_to_string(dir.join("styles.css")).unwrap();
    assert!(css.contains("grid-template-columns: repeat(2, 1fr)"));

    for name in ["a.png", "lib.png", "main.png"] {
        let tile = image::open(dir.join("images").join(name)).unwrap();
        assert_eq!((tile.width(), tile.height()), (41, 21));
    }
}

#[test]
fn html_with_no_documents_has_empty_grid() {
    let out = TempDir::new().unwrap();
    pipeline::run(
        Vec::new(),
        &small_config(),
        &Target::Html {
            dir: out.path().to_path_buf(),
        },
        None,
    )
    .unwrap();

    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains(r#"<div class="grid-container">"#));
    assert!(!html.contains(r#"class="grid-item""#));
}

#[test]
fn config_file_drives_the_run() {
    let tmp = project();
    let out = TempDir::new().unwrap();
    let config_path = out.path().join("atlas.toml");
    fs::write(
        &config_path,
        r##"
[render.canvas]
mode = "dynamic"
width = 1
height = 1

[layout]
columns = 1
border_width = 0

[output]
order = "height"
"##,
    )
    .unwrap();

    let config: AtlasConfig = config::load_config(&config_path).unwrap();
    let pipeline_config = PipelineConfig::from_config(&config).unwrap();
    let path = out.path().join("atlas.png");
    pipeline::run(
        load(tmp.path()),
        &pipeline_config,
        &Target::Raster { path: path.clone() },
        None,
    )
    .unwrap();

    // main.rs is tallest (3 lines, 6px) so it goes first and sets the cell.
    // Its widest line is a tab (4 points) plus 16 characters: 20 points, 40px.
    let atlas = image::open(&path).unwrap().to_rgb8();
    assert_eq!(atlas.dimensions(), (40, 18));
}
