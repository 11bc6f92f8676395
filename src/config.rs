//! User settings for the command-line front end.
//!
//! Read from `config.json` in the platform config directory. A missing file
//! means defaults. `BUDGETWISE_CURRENCY` and `BUDGETWISE_SNAPSHOT` override
//! whatever the file says.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CURRENCY: &str = "₹";
pub const CURRENCY_ENV: &str = "BUDGETWISE_CURRENCY";
pub const SNAPSHOT_ENV: &str = "BUDGETWISE_SNAPSHOT";

const CONFIG_FILE: &str = "config.json";
const SNAPSHOT_FILE: &str = "snapshot.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the config directory")]
    NoProjectDirs,

    #[error("Failed to read {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}", path = .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub currency_symbol: String,
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY.into(),
            snapshot_path: None,
        }
    }
}

pub fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "budgetwise", "Budgetwise").ok_or(ConfigError::NoProjectDirs)
}

impl Config {
    /// Platform config file, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let dirs = project_dirs()?;
        let config = Self::load_from(&dirs.config_dir().join(CONFIG_FILE))?;
        Ok(config.with_overrides(
            std::env::var(CURRENCY_ENV).ok(),
            std::env::var(SNAPSHOT_ENV).ok(),
        ))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Blank values are ignored.
    pub fn with_overrides(mut self, currency: Option<String>, snapshot: Option<String>) -> Self {
        if let Some(symbol) = currency.filter(|s| !s.trim().is_empty()) {
            self.currency_symbol = symbol;
        }
        if let Some(path) = snapshot.filter(|s| !s.trim().is_empty()) {
            self.snapshot_path = Some(PathBuf::from(path));
        }
        self
    }

    /// `--snapshot` flag first, then the configured path, then
    /// `snapshot.json` in the data directory.
    pub fn resolve_snapshot_path(&self, flag: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = flag.or(self.snapshot_path.as_deref()) {
            return Ok(path.to_path_buf());
        }
        Ok(project_dirs()?.data_dir().join(SNAPSHOT_FILE))
    }
}
