//! Sources for the remote geometry document.
//!
//! The map only ever performs one unauthenticated read per load, so sources
//! expose a single `fetch` and carry no caching or retry state.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::IngestError;

/// Anything that can produce the raw geometry document.
#[async_trait]
pub trait GeometrySource: Send + Sync {
    /// Read the whole document as text.
    async fn fetch(&self) -> Result<String, IngestError>;

    /// Human readable location used in logs.
    fn location(&self) -> String;
}

/// Plain HTTP GET against a fixed URL.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl GeometrySource for HttpSource {
    async fn fetch(&self) -> Result<String, IngestError> {
        debug!("fetching geometry from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| IngestError::Request {
                url: self.url.clone(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(IngestError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }
        response.text().await.map_err(|source| IngestError::Request {
            url: self.url.clone(),
            source,
        })
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Geometry document stored on the local filesystem.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GeometrySource for FileSource {
    async fn fetch(&self) -> Result<String, IngestError> {
        debug!("reading geometry from {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| IngestError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Source picked from a location string at configuration time.
#[derive(Clone, Debug)]
pub enum TopologySource {
    Http(HttpSource),
    File(FileSource),
}

impl TopologySource {
    /// `http://` and `https://` locations are fetched over the network,
    /// everything else is treated as a filesystem path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            TopologySource::Http(HttpSource::new(location))
        } else {
            TopologySource::File(FileSource::new(location))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, TopologySource::Http(_))
    }
}

#[async_trait]
impl GeometrySource for TopologySource {
    async fn fetch(&self) -> Result<String, IngestError> {
        match self {
            TopologySource::Http(source) => source.fetch().await,
            TopologySource::File(source) => source.fetch().await,
        }
    }

    fn location(&self) -> String {
        match self {
            TopologySource::Http(source) => source.location(),
            TopologySource::File(source) => source.location(),
        }
    }
}
