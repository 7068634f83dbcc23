//! GBFS response DTOs.
//!
//! Only the fields the board shows are mapped; GBFS feeds carry many more.

use serde::Deserialize;

/// Envelope shared by every GBFS feed.
#[derive(Debug, Clone, Deserialize)]
pub struct GbfsFeed<T> {
    /// POSIX timestamp of the last feed update.
    pub last_updated: Option<i64>,

    /// Seconds the feed may be cached for.
    pub ttl: Option<u64>,

    pub data: GbfsStations<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GbfsStations<T> {
    pub stations: Vec<T>,
}

/// An entry of `station_information.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationInformation {
    pub station_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub capacity: Option<u32>,
    /// Divvy extension: `classic` or `lightweight`.
    pub station_type: Option<String>,
}

/// An entry of `station_status.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationStatus {
    pub station_id: String,

    /// All rentable bikes, e-bikes included.
    pub num_bikes_available: u32,

    /// Divvy extension.
    #[serde(default)]
    pub num_ebikes_available: u32,

    pub num_docks_available: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_information_fixture() {
        let json = include_str!("../../data/mock_feeds/station_information.json");
        let feed: GbfsFeed<StationInformation> = serde_json::from_str(json).unwrap();

        assert_eq!(feed.ttl, Some(5));
        assert_eq!(feed.data.stations.len(), 3);

        let clark = &feed.data.stations[0];
        assert_eq!(clark.name, "Clark St & Lake St");
        assert_eq!(clark.capacity, Some(27));
        assert_eq!(clark.station_type.as_deref(), Some("classic"));

        assert_eq!(feed.data.stations[1].station_type, None);
    }

    #[test]
    fn deserialize_status_fixture() {
        let json = include_str!("../../data/mock_feeds/station_status.json");
        let feed: GbfsFeed<StationStatus> = serde_json::from_str(json).unwrap();

        assert_eq!(feed.data.stations.len(), 3);
        assert_eq!(feed.data.stations[0].num_bikes_available, 9);
        assert_eq!(feed.data.stations[0].num_ebikes_available, 3);
        // Missing e-bike count defaults to zero
        assert_eq!(feed.data.stations[1].num_ebikes_available, 0);
    }
}
