//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::fetch::{DirSource, FetchError, HttpSource, HttpSourceConfig, RaceSource};
use crate::models::current_year;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Where race files come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Static file server exposing `/data/races*.json`
    Http,
    /// Local directory holding `races/` and `races.json`
    Dir,
}

/// Race data source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_kind")]
    pub kind: SourceKind,

    /// Origin of the static file server (http source)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Root of the race files (dir source)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_kind() -> SourceKind {
    SourceKind::Dir
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("race-dashboard/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            base_url: default_base_url(),
            data_dir: default_data_dir(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl SourceConfig {
    /// Build the configured source.
    pub fn build(&self) -> Result<Arc<dyn RaceSource>, FetchError> {
        match self.kind {
            SourceKind::Dir => Ok(Arc::new(DirSource::new(self.data_dir.clone()))),
            SourceKind::Http => {
                let base_url = Url::parse(&self.base_url)
                    .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
                let source = HttpSource::new(HttpSourceConfig {
                    base_url,
                    timeout: Duration::from_secs(self.timeout_seconds),
                    user_agent: self.user_agent.clone(),
                })?;
                Ok(Arc::new(source))
            }
        }
    }
}

/// Year range configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearsConfig {
    /// First year with a race file; the range ends at the current year
    #[serde(default = "default_first_year")]
    pub first_year: i32,
}

fn default_first_year() -> i32 {
    2020
}

impl Default for YearsConfig {
    fn default() -> Self {
        Self {
            first_year: default_first_year(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Expose a dir source's files under `/data`
    #[serde(default = "default_serve_data")]
    pub serve_data: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_serve_data() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            serve_data: default_serve_data(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub years: YearsConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            source: SourceConfig::default(),
            years: YearsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Source timeout must be greater than 0".to_string(),
            ));
        }

        if self.source.kind == SourceKind::Http {
            if let Err(e) = Url::parse(&self.source.base_url) {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid source base_url {}: {}",
                    self.source.base_url, e
                )));
            }
        }

        if self.years.first_year > current_year() {
            return Err(ConfigError::ValidationError(format!(
                "First year {} is in the future",
                self.years.first_year
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
