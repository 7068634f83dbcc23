//! CTA timestamp handling.
//!
//! Both trackers report Chicago local time without an offset. Countdowns are
//! always computed between two feed timestamps, so the local clock of the
//! board never enters the calculation.

use chrono::NaiveDateTime;

/// Format of Train Tracker `prdt`/`arrT` fields, e.g. `20240315 14:05:30`.
pub const CTA_TIMESTAMP_FORMAT: &str = "%Y%m%d %H:%M:%S";

/// Error returned when a feed timestamp cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {value:?}: expected YYYYMMDD HH:MM:SS")]
pub struct TimeError {
    value: String,
}

/// Parse a Train Tracker timestamp.
pub fn parse_cta_timestamp(value: &str) -> Result<NaiveDateTime, TimeError> {
    NaiveDateTime::parse_from_str(value.trim(), CTA_TIMESTAMP_FORMAT).map_err(|_| TimeError {
        value: value.to_string(),
    })
}

/// Whole minutes from `from` to `to`, truncated toward zero.
///
/// ```
/// use arrival_board::domain::minutes_between;
///
/// assert_eq!(minutes_between("20240315 14:00:00", "20240315 14:07:59").unwrap(), 7);
/// ```
pub fn minutes_between(from: &str, to: &str) -> Result<i64, TimeError> {
    let from = parse_cta_timestamp(from)?;
    let to = parse_cta_timestamp(to)?;
    Ok((to - from).num_minutes())
}
