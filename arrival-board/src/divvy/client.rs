//! Divvy GBFS client.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::error::DivvyError;
use super::types::{GbfsFeed, StationInformation, StationStatus};

/// Default station information feed.
pub const DEFAULT_INFORMATION_URL: &str =
    "https://gbfs.divvybikes.com/gbfs/en/station_information.json";

/// Default station status feed.
pub const DEFAULT_STATUS_URL: &str = "https://gbfs.divvybikes.com/gbfs/en/station_status.json";

/// Configuration for the Divvy client.
#[derive(Debug, Clone)]
pub struct DivvyConfig {
    /// `station_information.json` URL
    pub information_url: String,
    /// `station_status.json` URL
    pub status_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DivvyConfig {
    /// Create a new config pointing at the public Divvy feeds.
    pub fn new() -> Self {
        Self {
            information_url: DEFAULT_INFORMATION_URL.to_string(),
            status_url: DEFAULT_STATUS_URL.to_string(),
            timeout_secs: 15,
        }
    }

    /// Set custom feed URLs.
    pub fn with_urls(mut self, information: impl Into<String>, status: impl Into<String>) -> Self {
        self.information_url = information.into();
        self.status_url = status.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for DivvyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Divvy GBFS feeds. No authentication is needed.
#[derive(Debug, Clone)]
pub struct DivvyClient {
    http: reqwest::Client,
    config: DivvyConfig,
}

impl DivvyClient {
    /// Create a new Divvy client.
    pub fn new(config: DivvyConfig) -> Result<Self, DivvyError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch every station's static information.
    pub async fn station_information(&self) -> Result<Vec<StationInformation>, DivvyError> {
        let feed: GbfsFeed<StationInformation> = self.get_json(&self.config.information_url).await?;
        Ok(feed.data.stations)
    }

    /// Fetch every station's current availability.
    pub async fn station_status(&self) -> Result<Vec<StationStatus>, DivvyError> {
        let feed: GbfsFeed<StationStatus> = self.get_json(&self.config.status_url).await?;
        Ok(feed.data.stations)
    }

    /// The information feed URL, used as the cache key.
    pub fn information_url(&self) -> &str {
        &self.config.information_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DivvyError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DivvyError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DivvyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DivvyError::Json {
            message: e.to_string(),
        })
    }
}
