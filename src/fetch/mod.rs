//! Asset fetching.
//!
//! The season tables are plain text resources addressed by a relative path.
//! They are read either from a local directory or from a static file server.
//! Nothing is cached: every call goes to the source.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tokio::fs;
use tracing::debug;
use url::Url;

use crate::config::{SourceConfig, SourceKind};

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid asset path: {0}")]
    InvalidPath(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },
}

/// A source of raw text assets.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Source identifier for logging.
    fn name(&self) -> &str;

    /// Fetch the full text of the asset at `path`.
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Reject absolute paths and parent traversal.
fn check_relative(path: &str) -> Result<(), FetchError> {
    let p = Path::new(path);
    let escapes = p
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if path.is_empty() || escapes {
        return Err(FetchError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Reads assets from a local directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetSource for FsSource {
    fn name(&self) -> &str {
        "fs"
    }

    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        check_relative(path)?;
        let full = self.root.join(path);
        debug!("Reading {:?}", full);
        fs::read_to_string(&full)
            .await
            .map_err(|source| FetchError::Io { path: full, source })
    }
}

/// Fetches assets over HTTP relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, FetchError> {
        // A base without a trailing slash would drop its last segment on join
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cpt-standings/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    /// Resolve an asset path against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        check_relative(path)?;
        self.base
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl AssetSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Build the configured asset source.
pub fn source_from_config(config: &SourceConfig) -> Result<Arc<dyn AssetSource>, FetchError> {
    Ok(match config.kind {
        SourceKind::Fs => Arc::new(FsSource::new(&config.root)),
        SourceKind::Http => Arc::new(HttpSource::new(
            &config.root,
            Duration::from_secs(config.timeout_seconds),
        )?),
    })
}
