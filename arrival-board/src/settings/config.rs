//! Display and timing configuration.

use std::time::Duration;

use serde::Deserialize;

/// Timing and panel geometry, from the optional `display` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DisplayConfig {
    /// Minimum seconds between the start of two polling cycles.
    pub refresh_secs: u64,

    /// Seconds each page stays on the panel before the next one is pushed.
    /// E-paper needs a few seconds to settle after a refresh.
    pub page_dwell_secs: u64,

    /// How long last-known values are shown after their feed starts failing.
    pub max_stale_secs: u64,

    /// Panel width in pixels (landscape).
    pub width: u32,

    /// Panel height in pixels (landscape).
    pub height: u32,
}

impl DisplayConfig {
    pub fn refresh(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn page_dwell(&self) -> Duration {
        Duration::from_secs(self.page_dwell_secs)
    }

    /// Staleness limit as a chrono duration, for comparing feed timestamps.
    pub fn max_stale(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.max_stale_secs).unwrap_or(i64::MAX / 1000))
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_secs: 2,
            page_dwell_secs: 4,
            max_stale_secs: 300,
            // 2.13" e-paper in landscape
            width: 250,
            height: 122,
        }
    }
}
