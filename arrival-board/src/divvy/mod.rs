//! Divvy bikeshare GBFS client.
//!
//! Two feeds are combined: `station_information` (names, coordinates,
//! capacity; changes rarely) and `station_status` (bike counts; changes
//! constantly). Only the status feed needs fetching every cycle.

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::sync::Arc;

pub use client::{DEFAULT_INFORMATION_URL, DEFAULT_STATUS_URL, DivvyClient, DivvyConfig};
pub use convert::{BikeCounts, DockInfo, DockReport, build_dock_reports, dock_info};
pub use error::DivvyError;
pub use mock::MockDivvyClient;
pub use types::{GbfsFeed, GbfsStations, StationInformation, StationStatus};

use crate::cache::CachedDivvyClient;

/// Where dock information and status come from.
#[derive(Clone)]
pub enum DivvySource {
    Live(CachedDivvyClient),
    Mock(MockDivvyClient),
}

impl DivvySource {
    pub async fn station_information(&self) -> Result<Arc<Vec<StationInformation>>, DivvyError> {
        match self {
            DivvySource::Live(client) => client.station_information().await,
            DivvySource::Mock(client) => client.station_information().await,
        }
    }

    pub async fn station_status(&self) -> Result<Vec<StationStatus>, DivvyError> {
        match self {
            DivvySource::Live(client) => client.station_status().await,
            DivvySource::Mock(client) => client.station_status().await,
        }
    }
}
