//! CTA Train Tracker and Bus Tracker client.
//!
//! Key characteristics of the trackers:
//! - Responses are XML; errors arrive either as an HTTP status or as an
//!   `errCd`/`<error>` element inside a 200 response
//! - Train predictions carry two timestamps (`prdt`, `arrT`); the countdown
//!   is their difference, so no local clock is involved
//! - Bus predictions carry a ready-made countdown: minutes, `DUE` or `DLY`

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{CtaClient, CtaConfig, DEFAULT_BUS_URL, DEFAULT_TRAIN_URL};
pub use convert::{
    BusPrediction, ConversionError, TrainArrival, convert_bus_prd, convert_train_eta,
    parse_countdown,
};
pub use error::CtaError;
pub use mock::MockCtaClient;
pub use types::{BusPrd, BusPredictionsResponse, TrainArrivalsResponse, TrainEta};

/// Where train and bus predictions come from.
#[derive(Debug, Clone)]
pub enum CtaSource {
    Live(CtaClient),
    Mock(MockCtaClient),
}

impl CtaSource {
    pub async fn train_arrivals(&self, stop_id: &str) -> Result<Vec<TrainArrival>, CtaError> {
        match self {
            CtaSource::Live(client) => client.train_arrivals(stop_id).await,
            CtaSource::Mock(client) => client.train_arrivals(stop_id).await,
        }
    }

    pub async fn bus_predictions(
        &self,
        stop_id: &str,
        route: &str,
    ) -> Result<Vec<BusPrediction>, CtaError> {
        match self {
            CtaSource::Live(client) => client.bus_predictions(stop_id, route).await,
            CtaSource::Mock(client) => client.bus_predictions(stop_id, route).await,
        }
    }
}
