//! CTA tracker error types.

use crate::retry::Transient;

/// Errors from the Train Tracker and Bus Tracker clients.
#[derive(Debug, thiserror::Error)]
pub enum CtaError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// XML deserialization failed
    #[error("XML parse error: {message}{}", body_suffix(.body))]
    Xml {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Request succeeded but the tracker reported an error code
    #[error("tracker error {code}: {message}")]
    Tracker { code: String, message: String },

    /// Rate limited by the API
    #[error("rate limited by CTA API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// API key missing or mock data unavailable
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

impl Transient for CtaError {
    fn is_transient(&self) -> bool {
        match self {
            CtaError::Http(_) | CtaError::RateLimited => true,
            CtaError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
