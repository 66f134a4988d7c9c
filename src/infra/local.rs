use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::info;

use crate::error::AcquisitionError;
use crate::fetch::{BasicClient, fetch_bytes};
use crate::flight::RawBatch;
use crate::parser::parse_payload;
use crate::query::FlightQuery;
use crate::services::flight_source::FlightSource;

/// Replays a saved payload (API envelope or scraped dump) from a file path or URL.
///
/// The query is ignored: the payload is assumed to already be for the
/// requested day.
pub struct LocalSource {
    location: String,
    timeout: Duration,
}

impl LocalSource {
    pub fn new(location: impl Into<String>, timeout: Duration) -> Self {
        Self {
            location: location.into(),
            timeout,
        }
    }

    async fn read(&self) -> Result<Vec<u8>, AcquisitionError> {
        if self.location.starts_with("http") {
            let url = Url::parse(&self.location)
                .map_err(|e| AcquisitionError::Malformed(format!("invalid source URL: {e}")))?;
            let client = BasicClient::new(self.timeout, self.timeout)?;
            fetch_bytes(&client, url).await
        } else {
            tokio::fs::read(&self.location)
                .await
                .map_err(|cause| AcquisitionError::Io {
                    path: self.location.clone(),
                    cause,
                })
        }
    }
}

#[async_trait]
impl FlightSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    #[tracing::instrument(skip(self, _query), fields(source = %self.location))]
    async fn fetch_raw_flights(&self, _query: &FlightQuery) -> Result<RawBatch, AcquisitionError> {
        let bytes = self.read().await?;
        let batch = parse_payload(&bytes)?;

        info!(records = batch.records.len(), "Flight dump loaded");
        Ok(batch)
    }
}
