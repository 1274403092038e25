use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::{ParseError, Url};

use crate::error::{FetchError, PipelineError};

/// Where a corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Http(Url),
    File(PathBuf),
}

impl FromStr for Source {
    type Err = PipelineError;

    /// `http(s)://` URLs are fetched remotely; `file://` URLs and anything
    /// without a scheme are read from disk.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| PipelineError::InvalidRequest(reason);
        match Url::parse(s) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Source::Http(url)),
                "file" => url
                    .to_file_path()
                    .map(Source::File)
                    .map_err(|()| invalid(format!("{s} does not name a local file"))),
                scheme => Err(invalid(format!("unsupported scheme {scheme:?} in {s}"))),
            },
            Err(ParseError::RelativeUrlWithoutBase) if !s.trim().is_empty() => {
                Ok(Source::File(PathBuf::from(s)))
            }
            Err(e) => Err(invalid(format!("{s:?} is not a valid source: {e}"))),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Http(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Acquisition collaborator: turns a [`Source`] into decoded corpus text.
///
/// Implementations report failures as [`FetchError`]s and never retry on
/// their own.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, source: &Source, deadline: Duration) -> Result<String, FetchError>;
}

/// Fetches `http(s)` sources with `reqwest` and reads local files with
/// `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_url(&self, url: &Url, deadline: Duration) -> Result<String, FetchError> {
        let transport = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::TimedOut(deadline)
            } else {
                FetchError::Unreachable(url.to_string(), e.to_string())
            }
        };

        let response = self
            .client
            .get(url.clone())
            .timeout(deadline)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        debug!(%url, %status, "response received");
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        decode(url.as_str(), body.to_vec())
    }

    async fn fetch_file(&self, path: &Path) -> Result<String, FetchError> {
        let origin = path.display().to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FetchError::Unreachable(origin.clone(), e.to_string()))?;
        decode(&origin, bytes)
    }
}

#[async_trait]
impl Fetch for SourceFetcher {
    async fn fetch(&self, source: &Source, deadline: Duration) -> Result<String, FetchError> {
        match source {
            Source::Http(url) => self.fetch_url(url, deadline).await,
            Source::File(path) => self.fetch_file(path).await,
        }
    }
}

fn decode(origin: &str, bytes: Vec<u8>) -> Result<String, FetchError> {
    String::from_utf8(bytes).map_err(|e| FetchError::Decode(origin.to_string(), e.to_string()))
}
