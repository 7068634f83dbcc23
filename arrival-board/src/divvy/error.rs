//! Divvy GBFS error types.

use crate::retry::Transient;

/// Errors that can occur when fetching the Divvy feeds.
#[derive(Debug, thiserror::Error)]
pub enum DivvyError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the feed host
    #[error("rate limited by Divvy GBFS")]
    RateLimited,

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl Transient for DivvyError {
    fn is_transient(&self) -> bool {
        match self {
            DivvyError::Http(_) | DivvyError::RateLimited => true,
            DivvyError::Api { status, .. } => *status >= 500,
            DivvyError::Json { .. } => false,
        }
    }
}
