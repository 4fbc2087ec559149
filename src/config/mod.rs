/// Application settings loaded from config.toml
pub mod app;

/// Environment variable overrides
pub mod env;

pub use app::{AppConfig, DirectoryConfig, DirectorySource, ExportConfig, StorageConfig};
