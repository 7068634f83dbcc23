//! Arrival estimates as shown on the panel.

use std::fmt;

/// Icon-font code point drawn next to a live-tracked estimate.
pub const LIVE_GLYPH: char = '$';

/// Icon-font code point drawn next to a schedule-only estimate.
pub const SCHEDULED_GLYPH: char = '%';

/// A single arrival estimate for a stop.
///
/// `scheduled` is true when the prediction comes from the timetable rather
/// than a tracked vehicle.
///
/// # Examples
///
/// ```
/// use arrival_board::domain::Eta;
///
/// assert_eq!(Eta::Minutes { minutes: 5, scheduled: false }.to_string(), "5min $");
/// assert_eq!(Eta::Due { scheduled: true }.to_string(), "Due %");
/// assert_eq!(Eta::Delayed.to_string(), "Dlyed %");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eta {
    /// Vehicle is approaching or at the stop.
    Due { scheduled: bool },
    /// Vehicle expected in this many whole minutes.
    Minutes { minutes: u32, scheduled: bool },
    /// Bus Tracker reports the vehicle as delayed with no countdown.
    Delayed,
}

impl Eta {
    /// Build an estimate from a countdown in minutes.
    ///
    /// Countdowns at or below zero collapse to `Due`.
    pub fn from_minutes(minutes: i64, scheduled: bool) -> Self {
        if minutes <= 0 {
            Eta::Due { scheduled }
        } else {
            Eta::Minutes {
                minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
                scheduled,
            }
        }
    }

    /// Age a previously observed estimate by `elapsed_mins`.
    ///
    /// Returns `None` once the vehicle has certainly passed. Used when a
    /// fetch fails and the last known estimates are shown instead.
    pub fn aged(self, elapsed_mins: i64) -> Option<Self> {
        if elapsed_mins <= 0 {
            return Some(self);
        }
        match self {
            Eta::Due { .. } => None,
            Eta::Minutes { minutes, scheduled } => {
                let remaining = i64::from(minutes) - elapsed_mins;
                if remaining < 0 {
                    None
                } else {
                    Some(Eta::from_minutes(remaining, scheduled))
                }
            }
            Eta::Delayed => Some(Eta::Delayed),
        }
    }

    fn glyph(&self) -> char {
        match self {
            Eta::Due { scheduled } | Eta::Minutes { scheduled, .. } if !*scheduled => LIVE_GLYPH,
            _ => SCHEDULED_GLYPH,
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Due { .. } => write!(f, "Due {}", self.glyph()),
            Eta::Minutes { minutes, .. } => write!(f, "{minutes}min {}", self.glyph()),
            Eta::Delayed => write!(f, "Dlyed {}", self.glyph()),
        }
    }
}
