//! GitHub loader.
//!
//! Supported locations:
//!
//! | URL | Behavior |
//! |---|---|
//! | `https://github.com/{owner}/{repo}` | whole repository, default branch |
//! | `https://github.com/{owner}/{repo}/tree/{ref}/{path}` | subtree at `ref` |
//! | `https://github.com/{owner}/{repo}/blob/{ref}/{path}` | one file |
//!
//! Trees are listed through the contents API one directory at a time and
//! files are downloaded from the raw-content host. Locations that are not on
//! `github.com` are skipped.

use super::{DocumentLoader, LoadError, PatternSet, normalize_newlines};
use crate::types::SourceDocument;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_RAW_URL: &str = "https://raw.githubusercontent.com";

const GITHUB_HOST: &str = "github.com/";
const USER_AGENT: &str = concat!("code-atlas/", env!("CARGO_PKG_VERSION"));

/// A parsed `github.com` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubLocation {
    /// A directory listing; `reference` is `None` for the default branch.
    Tree {
        owner: String,
        repo: String,
        reference: Option<String>,
        path: String,
    },
    File {
        owner: String,
        repo: String,
        reference: String,
        path: String,
    },
}

/// Parse a GitHub web URL.
///
/// Returns `Ok(None)` when the URL is not on `github.com` and an error when
/// it is but has an unrecognised shape.
pub fn parse_location(url: &str) -> Result<Option<GitHubLocation>, LoadError> {
    let Some(start) = url.find(GITHUB_HOST) else {
        return Ok(None);
    };
    let rest = &url[start + GITHUB_HOST.len()..];
    let rest = rest.split(['?', '#']).next().unwrap_or(rest);
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    let unsupported = || LoadError::UnsupportedUrl(url.to_string());
    let (owner, repo) = match segments.as_slice() {
        [owner, repo, ..] => (*owner, *repo),
        _ => return Err(unsupported()),
    };
    let owner = owner.to_string();
    let repo = repo.strip_suffix(".git").unwrap_or(repo).to_string();

    let location = match &segments[2..] {
        [] => GitHubLocation::Tree {
            owner,
            repo,
            reference: None,
            path: String::new(),
        },
        ["tree", reference, path @ ..] => GitHubLocation::Tree {
            owner,
            repo,
            reference: Some(reference.to_string()),
            path: path.join("/"),
        },
        ["blob", reference, path @ ..] if !path.is_empty() => GitHubLocation::File {
            owner,
            repo,
            reference: reference.to_string(),
            path: path.join("/"),
        },
        _ => return Err(unsupported()),
    };
    Ok(Some(location))
}

/// One entry of a contents API listing.
#[derive(Debug, Clone, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

/// The contents API answers a directory with an array and a file with an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing {
    Directory(Vec<ContentItem>),
    File(ContentItem),
}

pub struct GitHubLoader {
    client: Client,
    token: Option<String>,
    api_base: String,
    raw_base: String,
}

impl GitHubLoader {
    pub fn new(token: Option<String>) -> Result<Self, LoadError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            token: token.filter(|t| !t.is_empty()),
            api_base: GITHUB_API_URL.to_string(),
            raw_base: GITHUB_RAW_URL.to_string(),
        })
    }

    /// Point the loader at different API and raw-content hosts.
    pub fn with_base_urls(mut self, api_base: impl Into<String>, raw_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self.raw_base = raw_base.into().trim_end_matches('/').to_string();
        self
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }

    fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        log::debug!("GET {url}");
        let response = self.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    fn contents_url(&self, owner: &str, repo: &str, path: &str, reference: Option<&str>) -> String {
        let mut url = format!("{}/repos/{owner}/{repo}/contents/{path}", self.api_base);
        if let Some(reference) = reference {
            url.push_str("?ref=");
            url.push_str(reference);
        }
        url
    }

    fn raw_url(&self, owner: &str, repo: &str, reference: &str, path: &str) -> String {
        format!("{}/{owner}/{repo}/{reference}/{path}", self.raw_base)
    }

    /// Download one file. A failed download becomes an empty document.
    fn download(&self, url: &str, display_id: &str) -> SourceDocument {
        match self.fetch_text(url) {
            Ok(content) => SourceDocument::new(normalize_newlines(content), display_id),
            Err(e) => {
                log::warn!("{display_id}: download failed ({e}), rendering as empty");
                SourceDocument::blank(display_id)
            }
        }
    }

    fn scan(
        &self,
        owner: &str,
        repo: &str,
        reference: Option<&str>,
        path: &str,
        set: &PatternSet,
        documents: &mut Vec<SourceDocument>,
    ) -> Result<(), LoadError> {
        let url = self.contents_url(owner, repo, path, reference);
        let body = self.fetch_text(&url)?;
        let listing: Listing =
            serde_json::from_str(&body).map_err(|source| LoadError::Json { url, source })?;
        let items = match listing {
            Listing::Directory(items) => items,
            Listing::File(item) => vec![item],
        };

        for item in items {
            if set.is_ignored(&item.path) {
                log::debug!("Ignoring {}", item.path);
                continue;
            }
            match item.kind.as_str() {
                "file" => {
                    if !set.matches_name(&item.name) {
                        continue;
                    }
                    match &item.download_url {
                        Some(download_url) => documents.push(self.download(download_url, &item.path)),
                        None => log::warn!("{}: no download URL, skipping", item.path),
                    }
                }
                "dir" => self.scan(owner, repo, reference, &item.path, set, documents)?,
                other => log::debug!("Skipping {} ({other})", item.path),
            }
        }
        Ok(())
    }
}

impl DocumentLoader for GitHubLoader {
    fn load(
        &self,
        locations: &[String],
        patterns: &[String],
        ignore: &[String],
    ) -> Result<Vec<SourceDocument>, LoadError> {
        let set = PatternSet::new(patterns, ignore)?;
        let mut documents = Vec::new();
        for location in locations {
            match parse_location(location)? {
                None => log::warn!("Skipping {location}: not a github.com URL"),
                Some(GitHubLocation::File {
                    owner,
                    repo,
                    reference,
                    path,
                }) => {
                    if set.accepts(&path) {
                        let url = self.raw_url(&owner, &repo, &reference, &path);
                        documents.push(self.download(&url, &path));
                    } else {
                        log::debug!("Skipping {path}: filtered by patterns");
                    }
                }
                Some(GitHubLocation::Tree {
                    owner,
                    repo,
                    reference,
                    path,
                }) => self.scan(&owner, &repo, reference.as_deref(), &path, &set, &mut documents)?,
            }
        }
        Ok(documents)
    }
}
