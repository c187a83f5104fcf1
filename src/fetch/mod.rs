//! Race data sources.
//!
//! Race results are published as static JSON: one file per year at
//! `races/{year}.json` and an all-time file at `races.json`. A source either
//! fetches them over HTTP (below a `/data/` prefix) or reads them from a
//! local directory laid out the same way.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::RaceRecord;

/// Errors that can occur while loading a race file.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of races, found {0}")]
    NotAnArray(&'static str),
}

/// Relative path of the race file for `year`.
pub fn year_resource(year: &str) -> String {
    format!("races/{}.json", year)
}

/// Relative path of the all-time race file.
pub const ALL_TIME_RESOURCE: &str = "races.json";

/// Anything that can hand out race records.
#[async_trait]
pub trait RaceSource: Send + Sync {
    /// Records of a single year.
    async fn year_records(&self, year: &str) -> Result<Vec<RaceRecord>, FetchError>;

    /// Records of every race ever run, used by the leaderboard.
    async fn all_time_records(&self) -> Result<Vec<RaceRecord>, FetchError>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}

/// Parse a race file.
///
/// The document must be a JSON array. Entries that do not deserialize as a
/// race record are skipped with a warning so one bad race does not hide the
/// rest of the file.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RaceRecord>, FetchError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => return Err(FetchError::NotAnArray("object")),
        Value::Null => return Err(FetchError::NotAnArray("null")),
        Value::String(_) => return Err(FetchError::NotAnArray("string")),
        Value::Number(_) => return Err(FetchError::NotAnArray("number")),
        Value::Bool(_) => return Err(FetchError::NotAnArray("bool")),
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RaceRecord>(item) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping malformed race at index {}: {}", index, e),
        }
    }

    Ok(records)
}

/// Configuration for the HTTP source.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Origin serving the `/data/` tree
    pub base_url: Url,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl HttpSourceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            user_agent: concat!("race-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fetches race files from a static file server.
pub struct HttpSource {
    client: Client,
    data_root: Url,
}

impl HttpSource {
    /// Create a new source with the given configuration.
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("race-dashboard")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let data_root = Self::data_root(&config.base_url)?;

        Ok(Self { client, data_root })
    }

    /// `{base_url}/data/`, keeping any path prefix of the base URL.
    fn data_root(base_url: &Url) -> Result<Url, FetchError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("data/")
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    fn resource_url(&self, resource: &str) -> Result<Url, FetchError> {
        self.data_root
            .join(resource)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    async fn fetch(&self, resource: &str) -> Result<Vec<RaceRecord>, FetchError> {
        let url = self.resource_url(resource)?;
        info!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content = response.bytes().await?;
        debug!("Fetched {} bytes from {}", content.len(), url);

        parse_records(&content)
    }
}

#[async_trait]
impl RaceSource for HttpSource {
    async fn year_records(&self, year: &str) -> Result<Vec<RaceRecord>, FetchError> {
        self.fetch(&year_resource(year)).await
    }

    async fn all_time_records(&self) -> Result<Vec<RaceRecord>, FetchError> {
        self.fetch(ALL_TIME_RESOURCE).await
    }

    fn describe(&self) -> String {
        self.data_root.to_string()
    }
}

/// Reads race files from a local directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read(&self, resource: &str) -> Result<Vec<RaceRecord>, FetchError> {
        let path = self.root.join(resource);
        debug!("Reading {}", path.display());
        let content = fs::read(&path).await?;
        parse_records(&content)
    }
}

#[async_trait]
impl RaceSource for DirSource {
    async fn year_records(&self, year: &str) -> Result<Vec<RaceRecord>, FetchError> {
        self.read(&year_resource(year)).await
    }

    async fn all_time_records(&self) -> Result<Vec<RaceRecord>, FetchError> {
        self.read(ALL_TIME_RESOURCE).await
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
