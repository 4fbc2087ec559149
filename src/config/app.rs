//! Application configuration loading from config.toml
//!
//! Every section is optional; missing values fall back to defaults so a bare
//! checkout runs without a config file at all.

use super::env;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the repository is persisted
    pub storage: StorageConfig,
    /// Where CSV exports and backups are written
    pub export: ExportConfig,
    /// Which staff source drives assignment and reports
    pub directory: DirectoryConfig,
}

/// `[storage]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the JSON collections
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// `[export]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory for exported files
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("exports"),
        }
    }
}

/// `[directory]` section
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Staff source
    pub source: DirectorySource,
}

/// Where the authoritative staff list comes from
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySource {
    /// The repository's own staff collection
    #[default]
    Local,
    /// Identity users with the staff role (`users.json`)
    Users,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path_ref:?}: {e}"),
    })
}

/// Loads the configuration used by the binary.
///
/// Reads the file named by `OUTREACH_CONFIG` (default `./config.toml`); a
/// missing file yields defaults. `OUTREACH_DATA_DIR` overrides the data dir.
///
/// # Errors
/// Returns an error if an existing config file cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = env::config_path();
    let mut config = if path.exists() {
        let config = load_config(&path)?;
        info!("Loaded configuration from {:?}", path);
        config
    } else {
        info!("No config file at {:?}, using defaults", path);
        AppConfig::default()
    };

    if let Some(data_dir) = env::data_dir_override() {
        debug!("Data dir overridden by environment: {:?}", data_dir);
        config.storage.data_dir = data_dir;
    }
    Ok(config)
}
