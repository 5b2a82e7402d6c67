//! Document sources.
//!
//! A [`DocumentLoader`] turns a list of locations into [`SourceDocument`]s,
//! filtered by shell-style file patterns:
//!
//! | Loader | Locations |
//! |---|---|
//! | [`FileSystemLoader`] | local files and directories (walked recursively) |
//! | [`GitHubLoader`] | `github.com` repository, `tree/` and `blob/` URLs |
//!
//! Include patterns match the file name. Ignore patterns match either the
//! path (relative to the location) or the file name, so `target` prunes a
//! directory and `*.generated.rs` drops files anywhere. `*` also crosses `/`.
//!
//! A document that cannot be read or decoded as UTF-8 is kept with empty
//! content and a warning; only listing failures abort a load. Line endings
//! are folded to `\n` on the way in, so CRLF and CR files render like
//! their LF twins.

pub mod filesystem;
pub mod github;

pub use filesystem::FileSystemLoader;
pub use github::GitHubLoader;

use crate::types::SourceDocument;
use glob::Pattern;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Location does not exist: {0}")]
    NotFound(PathBuf),
    #[error("No file patterns provided; give at least one, e.g. '*.rs'")]
    NoPatterns,
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected response from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported GitHub URL: {0}")]
    UnsupportedUrl(String),
}

pub trait DocumentLoader {
    /// Load every document found at `locations`, in location order.
    fn load(
        &self,
        locations: &[String],
        patterns: &[String],
        ignore: &[String],
    ) -> Result<Vec<SourceDocument>, LoadError>;
}

/// Compiled include and ignore patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    include: Vec<Pattern>,
    ignore: Vec<Pattern>,
}

impl PatternSet {
    /// Compile both lists. An empty include list is an error.
    pub fn new(patterns: &[String], ignore: &[String]) -> Result<Self, LoadError> {
        if patterns.is_empty() {
            return Err(LoadError::NoPatterns);
        }
        Ok(Self {
            include: compile(patterns)?,
            ignore: compile(ignore)?,
        })
    }

    /// Whether a file name matches any include pattern.
    pub fn matches_name(&self, name: &str) -> bool {
        self.include.iter().any(|p| p.matches(name))
    }

    /// Whether a `/`-separated path, or its last segment, matches any ignore pattern.
    pub fn is_ignored(&self, path: &str) -> bool {
        let name = path.rsplit('/').next().unwrap_or(path);
        self.ignore
            .iter()
            .any(|p| p.matches(path) || p.matches(name))
    }

    /// Included by name and not ignored by path.
    pub fn accepts(&self, path: &str) -> bool {
        let name = path.rsplit('/').next().unwrap_or(path);
        self.matches_name(name) && !self.is_ignored(path)
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>, LoadError> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| LoadError::Pattern {
                pattern: p.clone(),
                source: e,
            })
        })
        .collect()
}

/// Fold `\r\n` and lone `\r` line endings into `\n`.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Whether a location should go to the GitHub loader instead of the filesystem.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn newlines_folded_to_lf() {
        assert_eq!(normalize_newlines("a\r\nb\r\n".into()), "a\nb\n");
        assert_eq!(normalize_newlines("a\rb\r".into()), "a\nb\n");
        assert_eq!(normalize_newlines("a\r\rb".into()), "a\n\nb");
        assert_eq!(normalize_newlines("a\n\nb".into()), "a\n\nb");
    }

    #[test]
    fn empty_patterns_rejected() {
        assert!(matches!(
            PatternSet::new(&[], &[]),
            Err(LoadError::NoPatterns)
        ));
    }

    #[test]
    fn invalid_pattern_reports_pattern() {
        let err = PatternSet::new(&strings(&["[*.rs"]), &[]).unwrap_err();
        assert!(err.to_string().contains("[*.rs"));
    }

    #[test]
    fn include_matches_file_name() {
        let set = PatternSet::new(&strings(&["*.java", "*.kt"]), &[]).unwrap();
        assert!(set.matches_name("Test.java"));
        assert!(set.matches_name("Main.kt"));
        assert!(!set.matches_name("build.gradle"));
    }

    #[test]
    fn ignore_matches_path_or_name() {
        let set = PatternSet::new(&strings(&["*"]), &strings(&["target", "*Test.java"])).unwrap();
        assert!(set.is_ignored("target"));
        assert!(set.is_ignored("sub/target"));
        assert!(set.is_ignored("src/test/FooTest.java"));
        assert!(!set.is_ignored("src/main/Foo.java"));
    }

    #[test]
    fn star_crosses_separators() {
        let set = PatternSet::new(&strings(&["*"]), &strings(&["src/*/generated*"])).unwrap();
        assert!(set.is_ignored("src/a/b/generated.rs"));
    }

    #[test]
    fn accepts_combines_both_lists() {
        let set = PatternSet::new(&strings(&["*.rs"]), &strings(&["tests/*"])).unwrap();
        assert!(set.accepts("src/lib.rs"));
        assert!(!set.accepts("tests/it.rs"));
        assert!(!set.accepts("README.md"));
    }

    #[test]
    fn remote_locations() {
        assert!(is_remote("https://github.com/rust-lang/rust"));
        assert!(is_remote("http://github.com/a/b"));
        assert!(!is_remote("src"));
        assert!(!is_remote("./github.com"));
    }
}
