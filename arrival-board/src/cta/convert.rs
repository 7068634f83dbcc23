//! Conversion from tracker DTOs to domain values.
//!
//! A single malformed prediction is logged and skipped rather than failing
//! the whole response.

use tracing::{debug, warn};

use crate::domain::{Eta, TimeError, WordReplacer, minutes_between};

use super::error::CtaError;
use super::types::{BusPrd, BusPredictionsResponse, TrainArrivalsResponse, TrainEta, non_empty};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a timestamp
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// Bus countdown was neither a number, `DUE`, nor `DLY`
    #[error("invalid countdown: {0:?}")]
    InvalidCountdown(String),

    /// Required field was empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// A train predicted to arrive at a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainArrival {
    pub station_name: String,
    pub stop_id: String,
    pub route: String,
    pub destination: String,
    pub eta: Eta,
}

/// A bus predicted to arrive at a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusPrediction {
    pub stop_id: String,
    pub stop_name: String,
    pub route: String,
    /// Destination with street suffixes abbreviated.
    pub destination: String,
    pub eta: Eta,
}

/// Convert a Train Tracker response.
///
/// A non-zero `errCd` fails the whole response.
pub fn convert_train_arrivals(
    response: &TrainArrivalsResponse,
) -> Result<Vec<TrainArrival>, CtaError> {
    if let Some(code) = non_empty(&response.err_cd)
        && code != "0"
    {
        return Err(CtaError::Tracker {
            code: code.to_string(),
            message: non_empty(&response.err_nm)
                .unwrap_or("unknown error")
                .to_string(),
        });
    }

    let arrivals = response
        .etas
        .iter()
        .filter_map(|eta| match convert_train_eta(eta) {
            Ok(arrival) => Some(arrival),
            Err(e) => {
                warn!(stop_id = %eta.stp_id, error = %e, "skipping train prediction");
                None
            }
        })
        .collect();

    Ok(arrivals)
}

/// Convert a single Train Tracker prediction.
pub fn convert_train_eta(eta: &TrainEta) -> Result<TrainArrival, ConversionError> {
    let station_name = required(&eta.sta_nm, "staNm")?;
    let destination = required(&eta.dest_nm, "destNm")?;
    let route = required(&eta.rt, "rt")?;

    let scheduled = eta.is_sch.trim() == "1";
    let eta_value = if eta.is_app.trim() == "1" {
        Eta::Due { scheduled }
    } else {
        Eta::from_minutes(minutes_between(&eta.prdt, &eta.arr_t)?, scheduled)
    };

    Ok(TrainArrival {
        station_name,
        stop_id: eta.stp_id.trim().to_string(),
        route,
        destination,
        eta: eta_value,
    })
}

/// Convert a Bus Tracker response.
///
/// A response carrying `<error>` elements (typically "No service scheduled")
/// yields no predictions.
pub fn convert_bus_predictions(
    response: &BusPredictionsResponse,
    abbreviations: &WordReplacer,
) -> Vec<BusPrediction> {
    for error in &response.errors {
        debug!(
            stop_id = error.stpid.as_deref().unwrap_or(""),
            route = error.rt.as_deref().unwrap_or(""),
            message = error.msg.as_deref().unwrap_or(""),
            "bus tracker reported no predictions"
        );
    }
    if !response.errors.is_empty() {
        return Vec::new();
    }

    response
        .predictions
        .iter()
        .filter_map(|prd| match convert_bus_prd(prd, abbreviations) {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                warn!(stop_id = %prd.stpid, error = %e, "skipping bus prediction");
                None
            }
        })
        .collect()
}

/// Convert a single Bus Tracker prediction.
pub fn convert_bus_prd(
    prd: &BusPrd,
    abbreviations: &WordReplacer,
) -> Result<BusPrediction, ConversionError> {
    let stop_id = required(&prd.stpid, "stpid")?;
    let destination = required(&prd.des, "des")?;

    Ok(BusPrediction {
        stop_id,
        stop_name: required(&prd.stpnm, "stpnm")?,
        route: required(&prd.rt, "rt")?,
        destination: abbreviations.apply(&destination),
        eta: parse_countdown(&prd.prdctdn)?,
    })
}

/// Parse a Bus Tracker countdown.
///
/// ```
/// use arrival_board::cta::parse_countdown;
/// use arrival_board::domain::Eta;
///
/// assert_eq!(parse_countdown("DUE").unwrap(), Eta::Due { scheduled: false });
/// assert_eq!(parse_countdown("DLY").unwrap(), Eta::Delayed);
/// assert_eq!(parse_countdown("7").unwrap(), Eta::Minutes { minutes: 7, scheduled: false });
/// ```
pub fn parse_countdown(value: &str) -> Result<Eta, ConversionError> {
    match value.trim() {
        "DUE" => Ok(Eta::Due { scheduled: false }),
        "DLY" => Ok(Eta::Delayed),
        other => other
            .parse::<i64>()
            .map(|minutes| Eta::from_minutes(minutes, false))
            .map_err(|_| ConversionError::InvalidCountdown(other.to_string())),
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ConversionError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ConversionError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}
