//! Cross-cycle board state.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::cta::{BusPrediction, TrainArrival};
use crate::divvy::{BikeCounts, DockInfo};
use crate::domain::Eta;

/// Everything remembered between polling cycles.
///
/// Entries are created the first time a feed mentions them and survive until
/// their stop is no longer configured. `etas`/`counts` hold the values from
/// the last successful fetch; `updated_at` says when that was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    /// Station name → destination → platform.
    pub trains: BTreeMap<String, BTreeMap<String, TrainStop>>,
    pub buses: BTreeMap<BusKey, BusStop>,
    /// Divvy station id → dock.
    pub bicycles: BTreeMap<String, BikeDock>,
}

/// A platform direction at a train station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainStop {
    pub route: String,
    pub destination: String,
    /// Platform stop id the arrivals were reported for.
    pub stop_id: String,
    pub etas: Vec<Eta>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TrainStop {
    pub fn new(arrival: &TrainArrival) -> Self {
        Self {
            route: arrival.route.clone(),
            destination: arrival.destination.clone(),
            stop_id: arrival.stop_id.clone(),
            etas: Vec::new(),
            updated_at: None,
        }
    }
}

/// A configured bus stop and route pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusKey {
    pub stop_id: String,
    pub route: String,
}

impl BusKey {
    pub fn new(stop_id: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            route: route.into(),
        }
    }
}

/// A bus stop served by one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusStop {
    pub route: String,
    pub destination: String,
    pub stop_name: String,
    pub etas: Vec<Eta>,
    pub updated_at: Option<NaiveDateTime>,
}

impl BusStop {
    pub fn new(prediction: &BusPrediction) -> Self {
        Self {
            route: prediction.route.clone(),
            destination: prediction.destination.clone(),
            stop_name: prediction.stop_name.clone(),
            etas: Vec::new(),
            updated_at: None,
        }
    }
}

/// A Divvy dock.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeDock {
    pub info: DockInfo,
    pub counts: Option<BikeCounts>,
    pub updated_at: Option<NaiveDateTime>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of platform directions tracked across all stations.
    pub fn train_stop_count(&self) -> usize {
        self.trains.values().map(BTreeMap::len).sum()
    }
}
