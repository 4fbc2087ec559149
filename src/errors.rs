//! Unified error types for the outreach tracker.
//!
//! Expected conditions (unknown ids, nothing to assign) are reported through
//! return values, not through this type. `Error` only covers the fallible edges:
//! configuration, input validation, storage and export.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Caller supplied input that cannot be accepted (e.g. blank remarks)
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description
        message: String,
    },

    /// Durable storage or backup payload problem
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable description
        message: String,
    },

    /// Text that does not name a known contact status
    #[error("Unknown contact status: {value}")]
    InvalidStatus {
        /// The rejected input
        value: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parse failure
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
