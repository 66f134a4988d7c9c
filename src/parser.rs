//! JSON parser for flight-schedule payloads.
//!
//! Two shapes are accepted: the schedule API's
//! `{"totalFlightCount": n, "flightData": [...]}` envelope, and a bare array
//! of records scraped from the schedule page.

use serde_json::Value;
use tracing::warn;

use crate::error::AcquisitionError;
use crate::flight::{RawBatch, RawFlightRecord, ScrapedRecord};

/// Decodes a payload into raw flight records.
///
/// # Errors
///
/// Returns [`AcquisitionError::Malformed`] if the bytes are not JSON, or if an
/// API envelope has no `flightData` array.
pub fn parse_payload(bytes: &[u8]) -> Result<RawBatch, AcquisitionError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AcquisitionError::Malformed(format!("invalid JSON: {e}")))?;

    match value {
        Value::Object(mut envelope) => {
            let reported_total = envelope.get("totalFlightCount").and_then(Value::as_u64);
            let records = match envelope.remove("flightData") {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Err(AcquisitionError::Malformed(
                        "flightData is not an array".to_string(),
                    ));
                }
                None => {
                    return Err(AcquisitionError::Malformed(
                        "missing flightData field".to_string(),
                    ));
                }
            };

            Ok(RawBatch {
                reported_total,
                records: records.into_iter().map(RawFlightRecord::Api).collect(),
                rejected: 0,
            })
        }
        Value::Array(items) => {
            let mut batch = RawBatch::default();
            for (index, item) in items.into_iter().enumerate() {
                match serde_json::from_value::<ScrapedRecord>(item) {
                    Ok(record) => batch.records.push(RawFlightRecord::Scraped(record)),
                    Err(e) => {
                        warn!(index, error = %e, "Dropping unreadable scraped record");
                        batch.rejected += 1;
                    }
                }
            }
            Ok(batch)
        }
        _ => Err(AcquisitionError::Malformed(
            "expected a JSON object or array".to_string(),
        )),
    }
}
