use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILENAME: &str = "buildboard.ron";

#[derive(Parser, Debug, Default)]
#[command(name = "buildboard", about = "Live build status dashboard for a CI push feed")]
pub struct Cli {
    /// Build server base URL, e.g. http://ci.local:7777
    #[arg(long)]
    pub server: Option<String>,
    /// RON config file; defaults to ./buildboard.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: String,
    /// Render and input poll interval in milliseconds.
    pub tick_ms: u64,
    pub log: LogDestination,
    pub log_file: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: "http://localhost:7777".to_string(),
            tick_ms: 75,
            log: LogDestination::File,
            log_file: PathBuf::from("./buildboard.log"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid server url `{url}`: {message}")]
    InvalidServer { url: String, message: String },
}

impl DashboardConfig {
    /// Load a RON config file. A missing file yields defaults unless `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// File values first, then command-line overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path, true)?,
            None => Self::load(Path::new(DEFAULT_CONFIG_FILENAME), false)?,
        };
        if let Some(server) = &cli.server {
            config.server = server.clone();
        }
        if let Some(log) = cli.log {
            config.log = log;
        }
        config.tick_ms = config.tick_ms.max(1);
        config.server_url()?;
        Ok(config)
    }

    pub fn server_url(&self) -> Result<Url, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidServer {
            url: self.server.clone(),
            message,
        };
        let url = Url::parse(&self.server).map_err(|err| invalid(err.to_string()))?;
        buildboard_feed::feed_url(&url).map_err(|err| invalid(err.to_string()))?;
        Ok(url)
    }
}
