//! Inputs to one board cycle.

use chrono::NaiveDateTime;

use crate::cta::{BusPrediction, TrainArrival};
use crate::divvy::DockReport;
use crate::settings::Settings;

/// The outcome of every fetch made in one cycle.
#[derive(Debug, Clone)]
pub struct CycleInput {
    /// Local time the cycle started.
    pub now: NaiveDateTime,
    pub trains: Vec<TrainFetch>,
    pub buses: Vec<BusFetch>,
    pub docks: DockFetch,
}

impl CycleInput {
    /// A cycle in which nothing was fetched.
    pub fn empty(now: NaiveDateTime) -> Self {
        Self {
            now,
            trains: Vec::new(),
            buses: Vec::new(),
            docks: DockFetch::Skipped,
        }
    }
}

/// Train Tracker result for one platform stop id.
#[derive(Debug, Clone)]
pub struct TrainFetch {
    pub stop_id: String,
    /// `None` when the request failed.
    pub arrivals: Option<Vec<TrainArrival>>,
}

/// Bus Tracker result for one stop and route.
#[derive(Debug, Clone)]
pub struct BusFetch {
    pub stop_id: String,
    pub route: String,
    /// `None` when the request failed.
    pub predictions: Option<Vec<BusPrediction>>,
}

/// Divvy result for all configured docks.
#[derive(Debug, Clone)]
pub enum DockFetch {
    /// Divvy is off or no docks are configured.
    Skipped,
    Failed,
    Fresh(Vec<DockReport>),
}

/// What the board is configured to show this cycle.
#[derive(Debug, Clone)]
pub struct BoardRules {
    pub train_stop_ids: Vec<String>,
    pub bus_stops: Vec<(String, String)>,
    pub dock_ids: Vec<String>,
    /// Destinations dropped once they report no arrivals.
    pub do_not_persist: Vec<String>,
    /// How long last-known values outlive a failing feed.
    pub max_stale: chrono::Duration,
}

impl BoardRules {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            train_stop_ids: settings.active_train_stops().to_vec(),
            bus_stops: settings.active_bus_stops(),
            dock_ids: settings.active_docks().to_vec(),
            do_not_persist: settings.train_tracker.do_not_persist_stations.clone(),
            max_stale: settings.display.max_stale(),
        }
    }
}

impl Default for BoardRules {
    fn default() -> Self {
        Self {
            train_stop_ids: Vec::new(),
            bus_stops: Vec::new(),
            dock_ids: Vec::new(),
            do_not_persist: Vec::new(),
            max_stale: chrono::Duration::minutes(5),
        }
    }
}
