//! Configuration loading for Parley.
//!
//! Configuration lives at `~/.parley/config.toml`:
//!
//! ```toml
//! [server]
//! base_url = "http://localhost:8080/api/v1"
//! ```
//!
//! A missing file is not an error — every field has a default. A malformed
//! file is a typed error surfaced at startup. The `PARLEY_SERVER_URL`
//! environment variable overrides the configured base URL.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ParleyConfig {
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config at {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config at {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ParleyConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        Self::load_from(path)
    }

    fn load_from(path: PathBuf) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    /// Resolve the backend base URL: env override, then config file, then
    /// the built-in default.
    #[must_use]
    pub fn base_url(config: Option<&Self>) -> String {
        if let Ok(url) = std::env::var("PARLEY_SERVER_URL")
            && !url.trim().is_empty()
        {
            return url;
        }
        config
            .and_then(|cfg| cfg.server.as_ref())
            .and_then(|server| server.base_url.clone())
            .unwrap_or_else(|| parley_client::DEFAULT_BASE_URL.to_owned())
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".parley").join("config.toml"))
}
