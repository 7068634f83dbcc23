//! Mock Divvy feeds read from disk.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::error::DivvyError;
use super::types::{GbfsFeed, StationInformation, StationStatus};

/// Serves `station_information.json` and `station_status.json` from a
/// directory. Both files are read once, at construction.
#[derive(Debug, Clone)]
pub struct MockDivvyClient {
    information: Arc<Vec<StationInformation>>,
    status: Arc<Vec<StationStatus>>,
}

impl MockDivvyClient {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, DivvyError> {
        let data_dir = data_dir.as_ref();
        let information: GbfsFeed<StationInformation> =
            read_feed(&data_dir.join("station_information.json"))?;
        let status: GbfsFeed<StationStatus> = read_feed(&data_dir.join("station_status.json"))?;

        Ok(Self {
            information: Arc::new(information.data.stations),
            status: Arc::new(status.data.stations),
        })
    }

    pub async fn station_information(&self) -> Result<Arc<Vec<StationInformation>>, DivvyError> {
        Ok(self.information.clone())
    }

    pub async fn station_status(&self) -> Result<Vec<StationStatus>, DivvyError> {
        Ok(self.status.as_ref().clone())
    }
}

fn read_feed<T: DeserializeOwned>(path: &Path) -> Result<GbfsFeed<T>, DivvyError> {
    let body = std::fs::read_to_string(path).map_err(|e| DivvyError::Api {
        status: 404,
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    serde_json::from_str(&body).map_err(|e| DivvyError::Json {
        message: format!("{}: {e}", path.display()),
    })
}
