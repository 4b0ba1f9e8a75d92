//! Where feeds come from.

use super::*;

use std::path::PathBuf;
use std::time::Duration;

use resolve_path::PathResolveExt;

/// A feed location: a remote url or a local file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl Source {
    /// Interpret a location string. `http(s)://` is remote; anything else
    /// (with or without `file://`) is a path, and `~` is expanded.
    pub fn new(location: impl AsRef<str>) -> Self {
        let location = location.as_ref().trim();
        let lower = location.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Source::Url(location.into());
        }
        let path = location.strip_prefix("file://").unwrap_or(location);
        Source::Path(PathBuf::from(path).resolve().into_owned())
    }

    /// Read the raw feed bytes.
    pub async fn fetch(&self, options: &FetchOptions) -> Result<Vec<u8>> {
        let bytes = match self {
            Source::Url(url) => options.fetch_url(url).await?,
            Source::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| Error::fetch(self.to_string(), e))?,
        };
        tracing::debug!("Read {} bytes from {}", bytes.len(), self);
        Ok(bytes)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::new(value)
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Source::new(value)
    }
}

/// Settings for the HTTP client used to fetch remote feeds.
#[derive(Clone, Debug, Default)]
pub struct FetchOptions {
    /// The user agent used to fetch the feed.
    /// If this is not set, no user agent is used.
    pub user_agent: Option<String>,
    /// Request timeout. If this is not set, requests never time out.
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        // Generate request.
        let mut client_builder = reqwest::ClientBuilder::new();
        if let Some(user_agent) = &self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        }
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder
            .build()
            .map_err(|e| Error::fetch(url, format!("bad client: {e}")))?;

        // Execute request.
        tracing::trace!("GET {}", url);
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(url, format!("HTTP {status}")));
        }

        let body = response.bytes().await.map_err(|e| Error::fetch(url, e))?;
        Ok(body.to_vec())
    }
}
