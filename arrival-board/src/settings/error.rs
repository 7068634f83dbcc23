//! Settings error types.

use std::path::PathBuf;

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for the expected shape
    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Values parsed but are inconsistent
    #[error("invalid settings: {0}")]
    Invalid(String),

    /// A coordinate environment variable is not a number
    #[error("{name} is not a valid coordinate: {value:?}")]
    InvalidCoordinate { name: &'static str, value: String },

    /// A word replacement could not be compiled
    #[error("invalid street name replacement: {0}")]
    Replacement(#[from] regex::Error),
}
