//! Predictor configuration
//!
//! Config file: $POKEPREDICT_CONFIG, else ~/.config/pokepredict/config.toml.
//! $POKEPREDICT_ENDPOINT overrides the endpoint from the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Service that answers the prediction POST
pub const DEFAULT_ENDPOINT: &str =
    "https://mlpokemonflask-fpb2dhhzbzexfseh.brazilsouth-01.azurewebsites.net/api/predict";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Explicit config file path
pub const CONFIG_ENV: &str = "POKEPREDICT_CONFIG";

/// Endpoint override
pub const ENDPOINT_ENV: &str = "POKEPREDICT_ENDPOINT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// URL the feature vector is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Upper bound on one request; 0 waits forever
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PredictorConfig {
    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("pokepredict").join("config.toml"))
    }

    /// Load from the default location, then apply environment overrides.
    /// A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// `None` when the timeout is disabled
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
