//! CTA Train Tracker and Bus Tracker HTTP client.
//!
//! Both trackers take the API key as a `key` query parameter and answer in
//! XML. Keys are issued separately per tracker; a missing key makes the
//! matching method return `NotConfigured` without touching the network.
//!
//! A configured URL may also be a template such as
//! `...ttarrivals.aspx?key={}&stpid={}`. Its `{}` placeholders are filled in
//! order (key, stop, route) and no other parameters are added.

use reqwest::{StatusCode, Url};

use crate::domain::{WordReplacer, bus_destination_abbreviations};

use super::convert::{BusPrediction, TrainArrival, convert_bus_predictions, convert_train_arrivals};
use super::error::CtaError;
use super::types::{BusPredictionsResponse, TrainArrivalsResponse};

/// Default Train Tracker arrivals endpoint.
pub const DEFAULT_TRAIN_URL: &str = "http://lapi.transitchicago.com/api/1.0/ttarrivals.aspx";

/// Default Bus Tracker predictions endpoint.
pub const DEFAULT_BUS_URL: &str = "http://www.ctabustracker.com/bustime/api/v2/getpredictions";

/// Most predictions requested per stop. Only three are ever shown.
const MAX_RESULTS: &str = "5";

/// Configuration for the CTA client.
#[derive(Debug, Clone)]
pub struct CtaConfig {
    /// Train Tracker API key
    pub train_api_key: Option<String>,
    /// Bus Tracker API key
    pub bus_api_key: Option<String>,
    /// Train Tracker `ttarrivals.aspx` URL or template
    pub train_url: String,
    /// Bus Tracker `getpredictions` URL or template
    pub bus_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CtaConfig {
    /// Create a new config with the given keys and the public endpoints.
    pub fn new(train_api_key: Option<String>, bus_api_key: Option<String>) -> Self {
        Self {
            train_api_key,
            bus_api_key,
            train_url: DEFAULT_TRAIN_URL.to_string(),
            bus_url: DEFAULT_BUS_URL.to_string(),
            timeout_secs: 15,
        }
    }

    /// Set a custom Train Tracker URL.
    pub fn with_train_url(mut self, url: impl Into<String>) -> Self {
        self.train_url = url.into();
        self
    }

    /// Set a custom Bus Tracker URL.
    pub fn with_bus_url(mut self, url: impl Into<String>) -> Self {
        self.bus_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// CTA tracker API client.
#[derive(Debug, Clone)]
pub struct CtaClient {
    http: reqwest::Client,
    config: CtaConfig,
    abbreviations: WordReplacer,
}

impl CtaClient {
    /// Create a new CTA client with the given configuration.
    pub fn new(config: CtaConfig) -> Result<Self, CtaError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config,
            abbreviations: bus_destination_abbreviations(),
        })
    }

    /// Get predicted train arrivals for a platform stop id.
    pub async fn train_arrivals(&self, stop_id: &str) -> Result<Vec<TrainArrival>, CtaError> {
        let key = self
            .config
            .train_api_key
            .as_deref()
            .ok_or_else(|| CtaError::NotConfigured("TRAIN_API_KEY is not set".to_string()))?;

        let body = self
            .get_xml(
                &self.config.train_url,
                &[("key", key), ("stpid", stop_id), ("max", MAX_RESULTS)],
            )
            .await?;

        let response: TrainArrivalsResponse = parse_xml(&body)?;
        convert_train_arrivals(&response)
    }

    /// Get bus predictions for a stop, limited to one route.
    pub async fn bus_predictions(
        &self,
        stop_id: &str,
        route: &str,
    ) -> Result<Vec<BusPrediction>, CtaError> {
        let key = self
            .config
            .bus_api_key
            .as_deref()
            .ok_or_else(|| CtaError::NotConfigured("BUS_API_KEY is not set".to_string()))?;

        let body = self
            .get_xml(
                &self.config.bus_url,
                &[
                    ("key", key),
                    ("stpid", stop_id),
                    ("rt", route),
                    ("top", MAX_RESULTS),
                ],
            )
            .await?;

        let response: BusPredictionsResponse = parse_xml(&body)?;
        Ok(convert_bus_predictions(&response, &self.abbreviations))
    }

    async fn get_xml(&self, url: &str, params: &[(&str, &str)]) -> Result<String, CtaError> {
        let response = self.http.get(request_url(url, params)?).send().await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CtaError::Unauthorized);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CtaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CtaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

/// Build the request URL from a configured URL and the ordered parameters.
///
/// With `{}` placeholders in `url`, parameter values fill them left to right
/// and surplus values are dropped. Otherwise every parameter is appended to
/// the query string.
pub(crate) fn request_url(url: &str, params: &[(&str, &str)]) -> Result<Url, CtaError> {
    let parsed = if url.contains("{}") {
        let mut filled = url.to_string();
        for (_, value) in params {
            if !filled.contains("{}") {
                break;
            }
            filled = filled.replacen("{}", value, 1);
        }
        Url::parse(&filled)
    } else {
        Url::parse_with_params(url, params)
    };
    parsed.map_err(|e| CtaError::NotConfigured(format!("invalid tracker URL {url}: {e}")))
}

/// Deserialize a tracker XML document, keeping a prefix of the body for
/// diagnostics on failure.
pub(crate) fn parse_xml<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, CtaError> {
    quick_xml::de::from_str(body).map_err(|e| CtaError::Xml {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = CtaConfig::new(Some("train".into()), None)
            .with_train_url("http://localhost:8080/tt")
            .with_bus_url("http://localhost:8080/bus")
            .with_timeout(60);

        assert_eq!(config.train_api_key.as_deref(), Some("train"));
        assert_eq!(config.bus_api_key, None);
        assert_eq!(config.train_url, "http://localhost:8080/tt");
        assert_eq!(config.bus_url, "http://localhost:8080/bus");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = CtaConfig::new(None, None);

        assert_eq!(config.train_url, DEFAULT_TRAIN_URL);
        assert_eq!(config.bus_url, DEFAULT_BUS_URL);
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn client_creation() {
        let client = CtaClient::new(CtaConfig::new(None, None));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn missing_keys_are_not_configured() {
        let client = CtaClient::new(CtaConfig::new(None, None)).unwrap();

        let err = client.train_arrivals("30074").await.unwrap_err();
        assert!(matches!(err, CtaError::NotConfigured(ref m) if m.contains("TRAIN_API_KEY")));

        let err = client.bus_predictions("1066", "66").await.unwrap_err();
        assert!(matches!(err, CtaError::NotConfigured(ref m) if m.contains("BUS_API_KEY")));
    }

    #[test]
    fn plain_url_gets_query_parameters() {
        let url = request_url(
            "http://lapi.transitchicago.com/api/1.0/ttarrivals.aspx",
            &[("key", "SECRET"), ("stpid", "30074"), ("max", "5")],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "http://lapi.transitchicago.com/api/1.0/ttarrivals.aspx?key=SECRET&stpid=30074&max=5"
        );
    }

    #[test]
    fn template_url_filled_in_order() {
        let url = request_url(
            "http://lapi.transitchicago.com/api/1.0/ttarrivals.aspx?key={}&stpid={}&max=5",
            &[("key", "SECRET"), ("stpid", "30074"), ("max", "5")],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "http://lapi.transitchicago.com/api/1.0/ttarrivals.aspx?key=SECRET&stpid=30074&max=5"
        );
    }

    #[test]
    fn bus_template_takes_route_third() {
        let url = request_url(
            "http://www.ctabustracker.com/bustime/api/v2/getpredictions?key={}&stpid={}&rt={}",
            &[("key", "SECRET"), ("stpid", "1066"), ("rt", "66"), ("top", "5")],
        )
        .unwrap();

        assert_eq!(url.query(), Some("key=SECRET&stpid=1066&rt=66"));
    }

    #[test]
    fn unparsable_url_is_not_configured() {
        let err = request_url("not a url", &[("key", "SECRET")]).unwrap_err();
        assert!(matches!(err, CtaError::NotConfigured(ref m) if m.contains("not a url")));
    }

    #[test]
    fn parse_xml_keeps_body_prefix() {
        let body = "<ctatt><eta>".repeat(100);
        let err = parse_xml::<TrainArrivalsResponse>(&body).unwrap_err();
        match err {
            CtaError::Xml { body: Some(b), .. } => assert_eq!(b.chars().count(), 500),
            other => panic!("expected XML error, got {other:?}"),
        }
    }
}
