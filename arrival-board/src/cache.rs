//! Caching layer for Divvy station information.
//!
//! Station names, coordinates and capacities change a few times a year, yet
//! the feed is several hundred kilobytes. It is cached for an hour while the
//! small status feed is fetched every cycle.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::divvy::{DivvyClient, DivvyError, StationInformation, StationStatus};

/// Cached information entry.
type InformationEntry = Arc<Vec<StationInformation>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 4,
        }
    }
}

/// Divvy client with cached station information.
#[derive(Clone)]
pub struct CachedDivvyClient {
    client: DivvyClient,
    /// Keyed by feed URL.
    information: MokaCache<String, InformationEntry>,
}

impl CachedDivvyClient {
    /// Create a new cached client.
    pub fn new(client: DivvyClient, config: &CacheConfig) -> Self {
        let information = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            information,
        }
    }

    /// Get station information, using the cache if available.
    pub async fn station_information(&self) -> Result<InformationEntry, DivvyError> {
        let key = self.client.information_url().to_string();

        if let Some(cached) = self.information.get(&key).await {
            return Ok(cached);
        }

        debug!(url = %key, "station information cache miss");
        let stations = Arc::new(self.client.station_information().await?);
        self.information.insert(key, stations.clone()).await;

        Ok(stations)
    }

    /// Get station status. Never cached.
    pub async fn station_status(&self) -> Result<Vec<StationStatus>, DivvyError> {
        self.client.station_status().await
    }
}
