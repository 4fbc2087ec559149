//! Environment variable lookups for the binary.
//!
//! `.env` files are loaded by `main` through `dotenvy` before these are read.

use std::path::PathBuf;

/// Variable naming the config file.
pub const CONFIG_VAR: &str = "OUTREACH_CONFIG";
/// Variable overriding `[storage] data_dir`.
pub const DATA_DIR_VAR: &str = "OUTREACH_DATA_DIR";

/// Path of the config file, `./config.toml` unless overridden.
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_VAR).map_or_else(|_| PathBuf::from("config.toml"), PathBuf::from)
}

/// Data directory from the environment, if set and non-empty.
#[must_use]
pub fn data_dir_override() -> Option<PathBuf> {
    std::env::var(DATA_DIR_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}
