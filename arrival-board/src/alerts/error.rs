//! Alert lookup error types.

use crate::retry::Transient;

/// Errors that can occur when looking up service alert posts.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check TWITTER_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by post lookup API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// None of the recent posts is a service status post
    #[error("no status post among the {checked} most recent posts")]
    NoStatusPost { checked: usize },

    /// Token missing
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl Transient for AlertError {
    fn is_transient(&self) -> bool {
        match self {
            AlertError::Http(_) => true,
            AlertError::Api { status, .. } => *status >= 500,
            // rate windows outlast a polling cycle
            _ => false,
        }
    }
}
