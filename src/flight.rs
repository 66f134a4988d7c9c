//! Raw and canonical flight records.

use serde::{Deserialize, Serialize};

/// Per-flight text scraped from the airport's schedule page.
///
/// Every field is free text and may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedRecord {
    pub scheduled_time: Option<String>,
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub status: Option<String>,
    /// CSS class of the status badge, used as a severity marker.
    pub status_class: Option<String>,
    pub airline: Option<String>,
}

/// One element of the `flightData` array returned by the schedule API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecord {
    pub id: Option<serde_json::Value>,
    pub scheduled_time: Option<String>,
    pub estimated_time: Option<String>,
    pub status: Option<String>,
    pub status_color: Option<String>,
    pub airline: Option<String>,
    pub airline_code: Option<String>,
    pub flight_numbers: Option<Vec<String>>,
    pub origins: Option<Vec<String>>,
    pub destinations: Option<Vec<String>>,
}

/// A flight record as delivered by one of the two acquisition paths.
///
/// API records stay as raw JSON until normalisation so that a single
/// malformed element cannot fail the whole payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFlightRecord {
    Scraped(ScrapedRecord),
    Api(serde_json::Value),
}

/// Raw records plus whatever the source reported about them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBatch {
    pub reported_total: Option<u64>,
    pub records: Vec<RawFlightRecord>,
    /// Elements of a scraped dump that could not be read as records.
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    #[default]
    OnTime,
    Delayed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terminal {
    #[default]
    T2,
    T3,
}

/// Source-agnostic flight consumed by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    /// `HH:MM` when the source gave something recognisable, otherwise the trimmed text.
    pub scheduled_time: String,
    pub status: FlightStatus,
    pub airline: String,
    pub flight_number: String,
    pub location: String,
    pub terminal: Terminal,
    pub raw_status: String,
}
