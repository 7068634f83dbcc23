//! The `settings.json` file.
//!
//! The file is re-read at the top of every polling cycle so stops can be
//! added or removed without restarting the board. Section and key names are
//! kebab-case, e.g.:
//!
//! ```json
//! {
//!   "train-tracker": {
//!     "enabled": "True",
//!     "api-url": "http://lapi.transitchicago.com/api/1.0/ttarrivals.aspx",
//!     "station-ids": ["30173", "30174"],
//!     "do-not-persist-stations": ["UIC-Halsted"]
//!   },
//!   "bus-tracker": { "enabled": true, "stop-ids": ["1066"], "route-ids": ["66"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::cta::{DEFAULT_BUS_URL, DEFAULT_TRAIN_URL};
use crate::divvy::{DEFAULT_INFORMATION_URL, DEFAULT_STATUS_URL};
use crate::domain::WordReplacer;

use super::config::DisplayConfig;
use super::error::SettingsError;

const DEFAULT_ALERT_URL: &str = "https://api.twitter.com/2/users/{}/tweets";

/// The CTA account whose status posts are shown.
pub const DEFAULT_ALERT_ACCOUNT_ID: &str = "342782636";

/// Everything read from `settings.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    pub train_tracker: TrainTrackerSettings,
    pub bus_tracker: BusTrackerSettings,
    pub divvy_tracker: DivvyTrackerSettings,
    pub tweet_tracker: AlertSettings,
    pub display: DisplayConfig,
}

/// Train Tracker section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TrainTrackerSettings {
    #[serde(deserialize_with = "deserialize_flag")]
    pub enabled: bool,
    pub api_url: String,
    /// Platform stop ids (`stpId`, 30000-series) to poll.
    #[serde(deserialize_with = "deserialize_ids")]
    pub station_ids: Vec<String>,
    /// Destinations that are dropped from the board once they stop running.
    pub do_not_persist_stations: Vec<String>,
}

impl Default for TrainTrackerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: DEFAULT_TRAIN_URL.to_string(),
            station_ids: Vec::new(),
            do_not_persist_stations: Vec::new(),
        }
    }
}

/// Bus Tracker section. `stop-ids` and `route-ids` are paired by position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BusTrackerSettings {
    #[serde(deserialize_with = "deserialize_flag")]
    pub enabled: bool,
    pub api_url: String,
    #[serde(deserialize_with = "deserialize_ids")]
    pub stop_ids: Vec<String>,
    #[serde(deserialize_with = "deserialize_ids")]
    pub route_ids: Vec<String>,
}

impl Default for BusTrackerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: DEFAULT_BUS_URL.to_string(),
            stop_ids: Vec::new(),
            route_ids: Vec::new(),
        }
    }
}

/// Divvy GBFS section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DivvyTrackerSettings {
    #[serde(deserialize_with = "deserialize_flag")]
    pub enabled: bool,
    pub api_station_information_url: String,
    pub api_station_status_url: String,
    #[serde(deserialize_with = "deserialize_ids")]
    pub station_ids: Vec<String>,
    /// Whole-word replacements applied to dock names and types.
    pub street_names_to_remove: BTreeMap<String, String>,
}

impl Default for DivvyTrackerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_station_information_url: DEFAULT_INFORMATION_URL.to_string(),
            api_station_status_url: DEFAULT_STATUS_URL.to_string(),
            station_ids: Vec::new(),
            street_names_to_remove: BTreeMap::new(),
        }
    }
}

/// Service alert post lookup section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AlertSettings {
    #[serde(deserialize_with = "deserialize_flag")]
    pub enabled: bool,
    /// URL template; `{}` is replaced by the account id.
    pub api_url: String,
    pub account_id: String,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: DEFAULT_ALERT_URL.to_string(),
            account_id: DEFAULT_ALERT_ACCOUNT_ID.to_string(),
        }
    }
}

impl Settings {
    /// Read and validate a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let bus = &self.bus_tracker;
        if bus.stop_ids.len() != bus.route_ids.len() {
            return Err(SettingsError::Invalid(format!(
                "bus-tracker has {} stop-ids but {} route-ids",
                bus.stop_ids.len(),
                bus.route_ids.len()
            )));
        }
        if self.tweet_tracker.enabled && !self.tweet_tracker.api_url.contains("{}") {
            return Err(SettingsError::Invalid(
                "tweet-tracker api-url must contain {} for the account id".to_string(),
            ));
        }
        self.street_replacer()?;
        Ok(())
    }

    /// Train stop ids to poll, empty when the tracker is off.
    pub fn active_train_stops(&self) -> &[String] {
        if self.train_tracker.enabled {
            &self.train_tracker.station_ids
        } else {
            &[]
        }
    }

    /// `(stop id, route)` pairs to poll, empty when the tracker is off.
    pub fn active_bus_stops(&self) -> Vec<(String, String)> {
        if !self.bus_tracker.enabled {
            return Vec::new();
        }
        self.bus_tracker
            .stop_ids
            .iter()
            .cloned()
            .zip(self.bus_tracker.route_ids.iter().cloned())
            .collect()
    }

    /// Divvy station ids to show, empty when the tracker is off.
    pub fn active_docks(&self) -> &[String] {
        if self.divvy_tracker.enabled {
            &self.divvy_tracker.station_ids
        } else {
            &[]
        }
    }

    /// Compile the dock name replacements.
    pub fn street_replacer(&self) -> Result<WordReplacer, SettingsError> {
        Ok(WordReplacer::new(&self.divvy_tracker.street_names_to_remove)?)
    }
}

/// Accept `true`/`false` as well as the strings `"True"`/`"False"`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" | "" => Ok(false),
            other => Err(D::Error::custom(format!(
                "expected true or false, got {other:?}"
            ))),
        },
    }
}

/// Accept a list of string or numeric ids; an empty string means no ids.
fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ids {
        List(Vec<Id>),
        Single(Id),
    }

    let to_string = |id: Id| match id {
        Id::Text(s) => s.trim().to_string(),
        Id::Number(n) => n.to_string(),
    };

    let ids = match Ids::deserialize(deserializer)? {
        Ids::List(ids) => ids.into_iter().map(to_string).collect(),
        Ids::Single(id) => vec![to_string(id)],
    };
    Ok(ids.into_iter().filter(|id: &String| !id.is_empty()).collect())
}
