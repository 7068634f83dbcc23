//! Secrets and home location from the environment.

use crate::domain::HomeLocation;

use super::error::SettingsError;

/// API keys and the home location.
///
/// These never live in `settings.json`. A missing key turns the matching
/// source off rather than failing startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub train_api_key: Option<String>,
    pub bus_api_key: Option<String>,
    pub alert_token: Option<String>,
    pub home: Option<HomeLocation>,
}

impl Credentials {
    /// Read `TRAIN_API_KEY`, `BUS_API_KEY`, `TWITTER_API_KEY`,
    /// `HOME_LATITUDE` and `HOME_LONGITUDE`.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let home = match (get("HOME_LATITUDE"), get("HOME_LONGITUDE")) {
            (Some(lat), Some(lon)) => Some(HomeLocation::new(
                parse_coordinate("HOME_LATITUDE", &lat, 90.0)?,
                parse_coordinate("HOME_LONGITUDE", &lon, 180.0)?,
            )),
            _ => None,
        };

        Ok(Self {
            train_api_key: get("TRAIN_API_KEY"),
            bus_api_key: get("BUS_API_KEY"),
            alert_token: get("TWITTER_API_KEY"),
            home,
        })
    }
}

fn parse_coordinate(name: &'static str, value: &str, limit: f64) -> Result<f64, SettingsError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| SettingsError::InvalidCoordinate {
            name,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_all_values() {
        let creds = Credentials::from_lookup(lookup(&[
            ("TRAIN_API_KEY", "train-key"),
            ("BUS_API_KEY", "bus-key"),
            ("TWITTER_API_KEY", "Bearer abc"),
            ("HOME_LATITUDE", "41.8781"),
            ("HOME_LONGITUDE", "-87.6298"),
        ]))
        .unwrap();

        assert_eq!(creds.train_api_key.as_deref(), Some("train-key"));
        assert_eq!(creds.bus_api_key.as_deref(), Some("bus-key"));
        assert_eq!(creds.alert_token.as_deref(), Some("Bearer abc"));
        assert_eq!(creds.home, Some(HomeLocation::new(41.8781, -87.6298)));
    }

    #[test]
    fn blank_values_are_missing() {
        let creds = Credentials::from_lookup(lookup(&[("TRAIN_API_KEY", "  ")])).unwrap();
        assert_eq!(creds, Credentials::default());
    }

    #[test]
    fn half_a_location_is_no_location() {
        let creds = Credentials::from_lookup(lookup(&[("HOME_LATITUDE", "41.9")])).unwrap();
        assert!(creds.home.is_none());
    }

    #[test]
    fn bad_coordinate_is_an_error() {
        let err = Credentials::from_lookup(lookup(&[
            ("HOME_LATITUDE", "north"),
            ("HOME_LONGITUDE", "-87.6"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidCoordinate {
                name: "HOME_LATITUDE",
                ..
            }
        ));

        let err = Credentials::from_lookup(lookup(&[
            ("HOME_LATITUDE", "41.9"),
            ("HOME_LONGITUDE", "-287.6"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidCoordinate {
                name: "HOME_LONGITUDE",
                ..
            }
        ));
    }
}
