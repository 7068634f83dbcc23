//! CTA tracker response DTOs.
//!
//! These map the XML documents returned by Train Tracker (`<ctatt>`) and Bus
//! Tracker (`<bustime-response>`). Values stay as strings here; parsing and
//! validation happen in `convert`. The trackers emit empty elements (`<errNm/>`)
//! rather than omitting them, so optional text is normalised by
//! [`non_empty`].

use serde::Deserialize;

/// Root of a `ttarrivals.aspx` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainArrivalsResponse {
    /// When the response was generated.
    pub tmst: Option<String>,

    /// `0` on success, otherwise a numeric error code.
    #[serde(rename = "errCd")]
    pub err_cd: Option<String>,

    /// Error description when `errCd` is non-zero.
    #[serde(rename = "errNm")]
    pub err_nm: Option<String>,

    /// One element per predicted arrival.
    #[serde(rename = "eta", default)]
    pub etas: Vec<TrainEta>,
}

/// A single Train Tracker arrival prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainEta {
    /// Parent station id (40000-series).
    #[serde(rename = "staId")]
    pub sta_id: String,

    /// Platform stop id (30000-series).
    #[serde(rename = "stpId")]
    pub stp_id: String,

    /// Station name, e.g. "Belmont".
    #[serde(rename = "staNm")]
    pub sta_nm: String,

    /// Platform description, e.g. "Service toward Loop".
    #[serde(rename = "stpDe")]
    pub stp_de: Option<String>,

    /// Run number.
    pub rn: Option<String>,

    /// Route code: Red, Blue, Brn, G, Org, P, Pink, Y.
    pub rt: String,

    /// Destination name, e.g. "Howard".
    #[serde(rename = "destNm")]
    pub dest_nm: String,

    /// When the prediction was generated.
    pub prdt: String,

    /// Predicted arrival time.
    #[serde(rename = "arrT")]
    pub arr_t: String,

    /// `1` when the train is approaching.
    #[serde(rename = "isApp")]
    pub is_app: String,

    /// `1` when the prediction is schedule-based.
    #[serde(rename = "isSch")]
    pub is_sch: String,

    /// `1` when the train is delayed.
    #[serde(rename = "isDly")]
    pub is_dly: Option<String>,
}

/// Root of a Bus Tracker `getpredictions` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusPredictionsResponse {
    #[serde(rename = "prd", default)]
    pub predictions: Vec<BusPrd>,

    /// Present instead of predictions when nothing is scheduled.
    #[serde(rename = "error", default)]
    pub errors: Vec<BusTrackerError>,
}

/// A single Bus Tracker prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct BusPrd {
    /// When the prediction was generated, `YYYYMMDD HH:MM`.
    pub tmstmp: Option<String>,

    /// `A` for arrival, `D` for departure.
    pub typ: Option<String>,

    /// Stop name, e.g. "Chicago & Milwaukee".
    pub stpnm: String,

    pub stpid: String,

    /// Vehicle id.
    pub vid: Option<String>,

    /// Route designator, e.g. "66".
    pub rt: String,

    /// Route direction, e.g. "Westbound".
    pub rtdir: Option<String>,

    /// Destination, e.g. "Austin".
    pub des: String,

    /// Predicted time, `YYYYMMDD HH:MM`.
    pub prdtm: Option<String>,

    /// Countdown: minutes, `DUE`, or `DLY`.
    pub prdctdn: String,
}

/// An `<error>` element in a Bus Tracker response.
#[derive(Debug, Clone, Deserialize)]
pub struct BusTrackerError {
    pub stpid: Option<String>,
    pub rt: Option<String>,
    pub msg: Option<String>,
}

/// Treat an empty or whitespace-only element as absent.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
