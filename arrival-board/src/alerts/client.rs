//! Post lookup client for CTA service alerts.
//!
//! CTA announces disruptions as posts whose text starts with a bracketed
//! line name, e.g. `[Red Line] ...`. Everything else (replies, promotions)
//! is skipped.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

use super::error::AlertError;

/// Response of the user timeline endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub data: Vec<PostDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostDto {
    pub id: Option<String>,
    pub text: String,
}

/// Configuration for the alert client.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Value for the `Authorization` header
    pub token: String,
    /// URL template with `{}` for the account id
    pub url_template: String,
    /// Account whose posts are read
    pub account_id: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AlertConfig {
    pub fn new(
        token: impl Into<String>,
        url_template: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            url_template: url_template.into(),
            account_id: account_id.into(),
            timeout_secs: 15,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The timeline URL for the configured account.
    pub fn url(&self) -> String {
        self.url_template.replacen("{}", &self.account_id, 1)
    }
}

/// Client for the post lookup API.
#[derive(Debug, Clone)]
pub struct AlertClient {
    http: reqwest::Client,
    url: String,
}

impl AlertClient {
    /// Create a new alert client.
    pub fn new(config: AlertConfig) -> Result<Self, AlertError> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&config.token)
            .map_err(|_| AlertError::NotConfigured("token is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url(),
        })
    }

    /// Fetch recent posts and return the newest status post's text.
    pub async fn latest_status_post(&self) -> Result<String, AlertError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AlertError::Unauthorized);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AlertError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let posts: PostsResponse = serde_json::from_str(&body).map_err(|e| AlertError::Json {
            message: e.to_string(),
        })?;

        first_status_post(&posts)
    }
}

/// The first post whose text opens with `[`.
pub fn first_status_post(posts: &PostsResponse) -> Result<String, AlertError> {
    posts
        .data
        .iter()
        .find(|post| post.text.starts_with('['))
        .map(|post| post.text.clone())
        .ok_or(AlertError::NoStatusPost {
            checked: posts.data.len(),
        })
}
