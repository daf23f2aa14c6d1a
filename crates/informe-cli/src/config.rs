//! Application configuration.
//!
//! Resolution order:
//! 1. the file given with `--config` (errors are fatal),
//! 2. `config.toml` in the platform configuration directory,
//! 3. the embedded default.
//!
//! Platform directories:
//! - Linux: ~/.config/informe/
//! - macOS: ~/Library/Application Support/es.informe.informe/
//! - Windows: %APPDATA%/informe/informe/config/

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use informe_core::ConverterCommand;
use informe_ingest::DEFAULT_NULL_MARKERS;
use informe_model::DoctorRegistry;

const APP_QUALIFIER: &str = "es";
const APP_ORG: &str = "informe";
const APP_NAME: &str = "informe";
const CONFIG_FILENAME: &str = "config.toml";

/// Configuration shipped with the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid embedded default config: {0}")]
    Embedded(#[source] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cell texts read as missing values.
    #[serde(default = "default_null_markers")]
    pub null_markers: Vec<String>,
    /// External converter for the fixed-layout copy.
    #[serde(default)]
    pub renderer: ConverterCommand,
    #[serde(default)]
    pub doctors: DoctorRegistry,
}

fn default_null_markers() -> Vec<String> {
    DEFAULT_NULL_MARKERS.iter().map(ToString::to_string).collect()
}

impl AppConfig {
    pub fn embedded() -> Result<Self, ConfigError> {
        toml::from_str(DEFAULT_CONFIG).map_err(ConfigError::Embedded)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    User(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::User(path) => write!(f, "{}", path.display()),
            Self::Embedded => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: ConfigSource,
}

/// Path of the per-user configuration file, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Loads configuration following the resolution order above.
///
/// An unreadable or invalid user file is logged and skipped; an invalid
/// explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    if let Some(path) = explicit {
        let config = AppConfig::from_path(path)?;
        tracing::info!(path = %path.display(), "loaded config");
        return Ok(LoadedConfig {
            config,
            source: ConfigSource::Explicit(path.to_path_buf()),
        });
    }

    if let Some(path) = user_config_path().filter(|path| path.is_file()) {
        match AppConfig::from_path(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded user config");
                return Ok(LoadedConfig {
                    config,
                    source: ConfigSource::User(path),
                });
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring user config, using defaults");
            }
        }
    }

    Ok(LoadedConfig {
        config: AppConfig::embedded()?,
        source: ConfigSource::Embedded,
    })
}
