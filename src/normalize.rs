//! Turns raw source records into canonical [`Flight`] values.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, warn};

use crate::analyzers::status::{SeverityHint, classify, has_delay_hint};
use crate::error::NormalizeError;
use crate::flight::{ApiRecord, Flight, RawFlightRecord, ScrapedRecord, Terminal};

/// Flights that survived normalisation, plus how many records were dropped.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub flights: Vec<Flight>,
    pub skipped: usize,
}

/// Qantas flights use T3; everything else is handled at T2.
pub fn terminal_for(airline: &str) -> Terminal {
    if airline.to_lowercase().contains("qantas") {
        Terminal::T3
    } else {
        Terminal::T2
    }
}

/// Trims scheduled-time text and reduces ISO-8601 date-times to `HH:MM`.
pub fn canonical_time(text: &str) -> String {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.format("%H:%M").to_string();
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return dt.format("%H:%M").to_string();
        }
    }

    text.to_string()
}

fn text(field: Option<&str>) -> String {
    field.map(str::trim).unwrap_or_default().to_string()
}

fn join(values: Option<&[String]>) -> String {
    values
        .unwrap_or_default()
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn from_scraped(record: &ScrapedRecord) -> Flight {
    let airline = text(record.airline.as_deref()).to_lowercase();
    let raw_status = text(record.status.as_deref());
    let severity = SeverityHint::from_marker(record.status_class.as_deref());

    Flight {
        scheduled_time: canonical_time(record.scheduled_time.as_deref().unwrap_or_default()),
        status: classify(&raw_status, severity, false),
        terminal: terminal_for(&airline),
        airline,
        flight_number: text(record.flight_number.as_deref()),
        location: text(record.origin.as_deref()),
        raw_status,
    }
}

fn from_api(record: &ApiRecord) -> Flight {
    let scheduled_time = canonical_time(record.scheduled_time.as_deref().unwrap_or_default());
    let airline = text(record.airline.as_deref()).to_lowercase();
    let raw_status = text(record.status.as_deref());
    let severity = SeverityHint::from_marker(record.status_color.as_deref());
    let delay_hint = has_delay_hint(&scheduled_time, record.estimated_time.as_deref());

    let mut location = join(record.origins.as_deref());
    if location.is_empty() {
        location = join(record.destinations.as_deref());
    }

    Flight {
        status: classify(&raw_status, severity, delay_hint),
        terminal: terminal_for(&airline),
        airline,
        flight_number: join(record.flight_numbers.as_deref()),
        location,
        scheduled_time,
        raw_status,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Normalises one raw record.
///
/// Missing fields never fail: they become empty strings and the status
/// defaults to on time. Only structurally broken API records return an error.
pub fn normalize(record: RawFlightRecord) -> Result<Flight, NormalizeError> {
    match record {
        RawFlightRecord::Scraped(scraped) => Ok(from_scraped(&scraped)),
        RawFlightRecord::Api(value) => {
            if !value.is_object() {
                return Err(NormalizeError::NotAnObject(json_kind(&value)));
            }
            let api: ApiRecord = serde_json::from_value(value)?;
            Ok(from_api(&api))
        }
    }
}

/// Normalises a batch in source order, skipping records that fail.
pub fn normalize_all(records: Vec<RawFlightRecord>) -> NormalizedBatch {
    let mut batch = NormalizedBatch {
        flights: Vec::with_capacity(records.len()),
        skipped: 0,
    };

    for (index, record) in records.into_iter().enumerate() {
        match normalize(record) {
            Ok(flight) => batch.flights.push(flight),
            Err(e) => {
                warn!(index, error = %e, "Skipping flight record");
                batch.skipped += 1;
            }
        }
    }

    debug!(
        flights = batch.flights.len(),
        skipped = batch.skipped,
        "Normalised flight records"
    );
    batch
}
