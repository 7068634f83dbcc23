//! Mock CTA client for running the board without API keys.
//!
//! Loads tracker responses from XML files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{WordReplacer, bus_destination_abbreviations};

use super::client::parse_xml;
use super::convert::{BusPrediction, TrainArrival, convert_bus_predictions, convert_train_arrivals};
use super::error::CtaError;
use super::types::{BusPredictionsResponse, TrainArrivalsResponse};

/// Mock CTA client that serves data from XML files.
///
/// Expects files named `train-{stop id}.xml` and `bus-{stop id}-{route}.xml`,
/// e.g. `train-30074.xml` and `bus-1066-66.xml`.
#[derive(Debug, Clone)]
pub struct MockCtaClient {
    /// Raw XML documents keyed by file stem.
    documents: Arc<HashMap<String, String>>,
    abbreviations: WordReplacer,
}

impl MockCtaClient {
    /// Create a new mock client by loading XML files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, CtaError> {
        let data_dir = data_dir.as_ref();
        let mut documents = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            CtaError::NotConfigured(format!(
                "failed to read mock data directory {data_dir:?}: {e}"
            ))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| CtaError::NotConfigured(format!("failed to read directory entry: {e}")))?
                .path();

            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("xml") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let xml = std::fs::read_to_string(&path)
                .map_err(|e| CtaError::NotConfigured(format!("failed to read {path:?}: {e}")))?;

            documents.insert(stem.to_string(), xml);
        }

        if documents.is_empty() {
            return Err(CtaError::NotConfigured(format!(
                "no mock tracker files found in {data_dir:?}"
            )));
        }

        Ok(Self {
            documents: Arc::new(documents),
            abbreviations: bus_destination_abbreviations(),
        })
    }

    /// Mimics [`CtaClient::train_arrivals`](super::CtaClient::train_arrivals).
    pub async fn train_arrivals(&self, stop_id: &str) -> Result<Vec<TrainArrival>, CtaError> {
        let body = self.document(&format!("train-{stop_id}"))?;
        let response: TrainArrivalsResponse = parse_xml(body)?;
        convert_train_arrivals(&response)
    }

    /// Mimics [`CtaClient::bus_predictions`](super::CtaClient::bus_predictions).
    pub async fn bus_predictions(
        &self,
        stop_id: &str,
        route: &str,
    ) -> Result<Vec<BusPrediction>, CtaError> {
        let body = self.document(&format!("bus-{stop_id}-{route}"))?;
        let response: BusPredictionsResponse = parse_xml(body)?;
        Ok(convert_bus_predictions(&response, &self.abbreviations))
    }

    /// File stems available in the mock data.
    pub fn available(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn document(&self, name: &str) -> Result<&str, CtaError> {
        self.documents
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| CtaError::Api {
                status: 404,
                message: format!("no mock data for {name}. Available: {:?}", self.available()),
            })
    }
}
