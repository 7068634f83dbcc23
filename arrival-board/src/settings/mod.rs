//! Settings for the board: the JSON settings file, display timing, and
//! secrets read from the environment.

mod config;
mod credentials;
mod error;
mod file;

pub use config::DisplayConfig;
pub use credentials::Credentials;
pub use error::SettingsError;
pub use file::{
    AlertSettings, BusTrackerSettings, DEFAULT_ALERT_ACCOUNT_ID, DivvyTrackerSettings, Settings,
    TrainTrackerSettings,
};
