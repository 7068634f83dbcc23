//! Conversion from GBFS DTOs to the docks shown on the board.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{HomeLocation, WordReplacer};

use super::types::{StationInformation, StationStatus};

/// Static description of a dock.
#[derive(Debug, Clone, PartialEq)]
pub struct DockInfo {
    pub station_id: String,
    /// Name with street words replaced.
    pub name: String,
    /// Station type with street words replaced; empty when the feed omits it.
    pub station_type: String,
    pub capacity: Option<u32>,
    /// Distance from home, when a home location is configured.
    pub distance_miles: Option<f64>,
}

/// Bikes currently available at a dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BikeCounts {
    pub ebikes: u32,
    pub classic: u32,
}

impl From<&StationStatus> for BikeCounts {
    fn from(status: &StationStatus) -> Self {
        // Divvy reports every available bike as classic, e-bikes included
        Self {
            ebikes: status.num_ebikes_available,
            classic: status.num_bikes_available,
        }
    }
}

/// A dock with its current availability.
#[derive(Debug, Clone, PartialEq)]
pub struct DockReport {
    pub info: DockInfo,
    /// `None` when the status feed has no entry for the dock.
    pub counts: Option<BikeCounts>,
}

/// Join information and status for the wanted docks, in the order given.
///
/// Wanted ids missing from the information feed are logged and skipped.
pub fn build_dock_reports(
    information: &[StationInformation],
    status: &[StationStatus],
    wanted: &[String],
    home: Option<HomeLocation>,
    replacer: &WordReplacer,
) -> Vec<DockReport> {
    let info_by_id: HashMap<&str, &StationInformation> = information
        .iter()
        .map(|s| (s.station_id.as_str(), s))
        .collect();
    let status_by_id: HashMap<&str, &StationStatus> =
        status.iter().map(|s| (s.station_id.as_str(), s)).collect();

    wanted
        .iter()
        .filter_map(|id| {
            let Some(info) = info_by_id.get(id.as_str()) else {
                warn!(station_id = %id, "dock not found in station information");
                return None;
            };
            Some(DockReport {
                info: dock_info(info, home, replacer),
                counts: status_by_id.get(id.as_str()).map(|s| BikeCounts::from(*s)),
            })
        })
        .collect()
}

/// Convert a single station information entry.
pub fn dock_info(
    info: &StationInformation,
    home: Option<HomeLocation>,
    replacer: &WordReplacer,
) -> DockInfo {
    DockInfo {
        station_id: info.station_id.clone(),
        name: replacer.apply(&info.name),
        station_type: replacer.apply(info.station_type.as_deref().unwrap_or_default()),
        capacity: info.capacity,
        distance_miles: home.map(|h| h.distance_miles(info.lat, info.lon)),
    }
}
