//! Local filesystem loader.
//!
//! A location naming a file skips the include patterns but still honors the
//! ignore patterns.
//! A directory is walked recursively in file-name order, so the same tree
//! always yields the same document order.

use super::{DocumentLoader, LoadError, PatternSet, normalize_newlines};
use crate::types::SourceDocument;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemLoader;

impl FileSystemLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for FileSystemLoader {
    fn load(
        &self,
        locations: &[String],
        patterns: &[String],
        ignore: &[String],
    ) -> Result<Vec<SourceDocument>, LoadError> {
        let set = PatternSet::new(patterns, ignore)?;
        let mut documents = Vec::new();
        for location in locations {
            let root = Path::new(location);
            if !root.exists() {
                return Err(LoadError::NotFound(root.to_path_buf()));
            }
            if root.is_file() {
                if set.is_ignored(&location.replace('\\', "/")) {
                    log::debug!("Ignoring {location}");
                    continue;
                }
                documents.push(read_document(root));
            } else {
                documents.extend(walk(root, &set)?);
            }
        }
        Ok(documents)
    }
}

/// All accepted files under `root`. Ignored directories are not descended into.
fn walk(root: &Path, set: &PatternSet) -> Result<Vec<SourceDocument>, LoadError> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !set.is_ignored(&relative_path(root, e.path())));

    let mut documents = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !set.matches_name(&entry.file_name().to_string_lossy()) {
            continue;
        }
        documents.push(read_document(entry.path()));
    }
    log::debug!("{}: {} matching files", root.display(), documents.len());
    Ok(documents)
}

/// `path` relative to `root`, `/`-separated.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

/// Read one file as UTF-8. Unreadable or undecodable files become empty documents.
pub fn read_document(path: &Path) -> SourceDocument {
    let display_id = path.to_string_lossy().into_owned();
    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(content) => SourceDocument::new(normalize_newlines(content), display_id),
            Err(e) => {
                log::warn!("{}: not valid UTF-8 ({e}), rendering as empty", path.display());
                SourceDocument::blank(display_id)
            }
        },
        Err(e) => {
            log::warn!("{}: cannot read ({e}), rendering as empty", path.display());
            SourceDocument::blank(display_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{CanvasMode, RasterRenderer, RenderConfig};
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn ids(documents: &[SourceDocument], root: &Path) -> Vec<String> {
        documents
            .iter()
            .map(|d| relative_path(root, Path::new(d.display_id.as_deref().unwrap())))
            .collect()
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/main/java/Main.java", b"class Main {}");
        write(tmp.path(), "src/main/java/Util.java", b"class Util {}");
        write(tmp.path(), "src/test/java/MainTest.java", b"class MainTest {}");
        write(tmp.path(), "build/Gen.java", b"class Gen {}");
        write(tmp.path(), "README.md", b"# readme");
        tmp
    }

    #[test]
    fn walks_recursively_in_name_order() {
        let tmp = fixture();
        let location = tmp.path().to_string_lossy().to_string();
        let docs = FileSystemLoader::new()
            .load(&[location], &strings(&["*.java"]), &[])
            .unwrap();

        assert_eq!(
            ids(&docs, tmp.path()),
            vec![
                "build/Gen.java",
                "src/main/java/Main.java",
                "src/main/java/Util.java",
                "src/test/java/MainTest.java",
            ]
        );
        assert_eq!(docs[1].content, "class Main {}");
    }

    #[test]
    fn ignore_prunes_directories_and_names() {
        let tmp = fixture();
        let location = tmp.path().to_string_lossy().to_string();
        let docs = FileSystemLoader::new()
            .load(
                &[location],
                &strings(&["*.java"]),
                &strings(&["build", "*Test.java"]),
            )
            .unwrap();

        assert_eq!(
            ids(&docs, tmp.path()),
            vec!["src/main/java/Main.java", "src/main/java/Util.java"]
        );
    }

    #[test]
    fn ignore_matches_relative_path() {
        let tmp = fixture();
        let location = tmp.path().to_string_lossy().to_string();
        let docs = FileSystemLoader::new()
            .load(&[location], &strings(&["*.java"]), &strings(&["src/test"]))
            .unwrap();
        assert_eq!(docs.len(), 3);
    }

    #[test]
    fn multiple_patterns() {
        let tmp = fixture();
        let location = tmp.path().to_string_lossy().to_string();
        let docs = FileSystemLoader::new()
            .load(&[location], &strings(&["*.md", "Util.*"]), &[])
            .unwrap();
        assert_eq!(
            ids(&docs, tmp.path()),
            vec!["README.md", "src/main/java/Util.java"]
        );
    }

    #[test]
    fn explicit_file_skips_pattern_filter() {
        let tmp = fixture();
        let file = tmp.path().join("README.md").to_string_lossy().to_string();
        let docs = FileSystemLoader::new()
            .load(&[file.clone()], &strings(&["*.java"]), &[])
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].display_id.as_deref(), Some(file.as_str()));
        assert_eq!(docs[0].content, "# readme");
    }

    #[test]
    fn explicit_file_honors_ignore() {
        let tmp = fixture();
        let file = tmp.path().join("README.md").to_string_lossy().to_string();
        let by_name = FileSystemLoader::new()
            .load(&[file.clone()], &strings(&["*.java"]), &strings(&["README.md"]))
            .unwrap();
        assert!(by_name.is_empty());

        let by_glob = FileSystemLoader::new()
            .load(&[file], &strings(&["*.java"]), &strings(&["*.md"]))
            .unwrap();
        assert!(by_glob.is_empty());
    }

    #[test]
    fn locations_keep_their_order() {
        let tmp = fixture();
        let util = tmp.path().join("src/main/java/Util.java");
        let main = tmp.path().join("src/main/java/Main.java");
        let docs = FileSystemLoader::new()
            .load(
                &[
                    util.to_string_lossy().to_string(),
                    main.to_string_lossy().to_string(),
                ],
                &strings(&["*"]),
                &[],
            )
            .unwrap();
        assert_eq!(docs[0].content, "class Util {}");
        assert_eq!(docs[1].content, "class Main {}");
    }

    #[test]
    fn missing_location_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope").to_string_lossy().to_string();
        let result = FileSystemLoader::new().load(&[missing], &strings(&["*.rs"]), &[]);
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn empty_patterns_rejected() {
        let tmp = fixture();
        let location = tmp.path().to_string_lossy().to_string();
        let result = FileSystemLoader::new().load(&[location], &[], &[]);
        assert!(matches!(result, Err(LoadError::NoPatterns)));
    }

    #[test]
    fn line_endings_render_alike() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a_lf.rs", b"ab\ncd\n");
        write(tmp.path(), "b_crlf.rs", b"ab\r\ncd\r\n");
        write(tmp.path(), "c_cr.rs", b"ab\rcd\r");
        let location = tmp.path().to_string_lossy().to_string();
        let docs = FileSystemLoader::new()
            .load(&[location], &strings(&["*.rs"]), &[])
            .unwrap();

        assert_eq!(docs.len(), 3);
        for doc in &docs {
            assert_eq!(doc.content, "ab\ncd\n");
        }

        let renderer = RasterRenderer::new(RenderConfig {
            canvas: CanvasMode::Dynamic {
                min_width: 1,
                min_height: 1,
            },
            ..RenderConfig::default()
        })
        .unwrap();
        let dims: Vec<_> = docs.iter().map(|d| renderer.render(d).dimensions()).collect();
        assert_eq!(dims[0], dims[1]);
        assert_eq!(dims[0], dims[2]);
    }

    #[test]
    fn non_utf8_file_becomes_empty_document() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "bad.rs", &[0xff, 0xfe, 0x00, 0x41]);
        write(tmp.path(), "good.rs", b"fn main() {}");
        let location = tmp.path().to_string_lossy().to_string();
        let docs = FileSystemLoader::new()
            .load(&[location], &strings(&["*.rs"]), &[])
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "");
        assert!(docs[0].display_id.as_deref().unwrap().ends_with("bad.rs"));
        assert_eq!(docs[1].content, "fn main() {}");
    }
}
