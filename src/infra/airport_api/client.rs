use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AcquisitionError;
use crate::fetch::{ApiKey, BasicClient, HttpClient, fetch_bytes};
use crate::flight::RawBatch;
use crate::parser::parse_payload;
use crate::query::FlightQuery;
use crate::services::flight_source::FlightSource;

/// Client for the airport's flight-schedule JSON API.
pub struct AirportApiClient {
    base_url: Url,
    http: Box<dyn HttpClient>,
}

impl AirportApiClient {
    /// Builds a client from configuration, adding the API-key header when a key is set.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .with_context(|| format!("invalid api_base_url '{}'", config.api_base_url))?;
        let basic = BasicClient::new(config.timeout(), config.connect_timeout())?;

        let http: Box<dyn HttpClient> = match &config.api_key {
            Some(key) => Box::new(ApiKey::new(basic, &config.api_key_header, key)?),
            None => Box::new(basic),
        };

        Ok(Self { base_url, http })
    }

    /// `{base}/flights?date=YYYY-MM-DD&type=domestic[&direction=arrival]`
    pub fn request_url(&self, query: &FlightQuery) -> Url {
        let mut url = self.base_url.clone();
        // A base URL with a trailing slash would otherwise yield `//flights`.
        let path = format!("{}/flights", url.path().trim_end_matches('/'));
        url.set_path(&path);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("date", &query.date_param());
            pairs.append_pair("type", query.flight_type.as_str());
            if let Some(direction) = query.flight_direction {
                pairs.append_pair("direction", direction.as_str());
            }
        }
        url
    }
}

#[async_trait]
impl FlightSource for AirportApiClient {
    fn name(&self) -> &str {
        "api"
    }

    #[tracing::instrument(skip(self, query), fields(date = %query.date, flight_type = %query.flight_type))]
    async fn fetch_raw_flights(&self, query: &FlightQuery) -> Result<RawBatch, AcquisitionError> {
        let url = self.request_url(query);
        let bytes = fetch_bytes(self.http.as_ref(), url).await?;
        let batch = parse_payload(&bytes)?;

        info!(
            records = batch.records.len(),
            reported_total = batch.reported_total,
            "Flight schedule fetched"
        );
        Ok(batch)
    }
}
