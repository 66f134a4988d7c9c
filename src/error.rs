//! Error taxonomy for a single flight-summary request.
//!
//! Validation errors stop a request before any data is fetched, acquisition
//! errors abort it, and normalisation errors only ever drop one record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Client input outside the accepted parameter sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid date '{0}': expected one of today, yesterday, tomorrow, day_after_tomorrow")]
    Date(String),
    #[error("invalid flightType '{0}': expected domestic or international")]
    FlightType(String),
    #[error("invalid flightDirection '{0}': expected arrival or departure")]
    FlightDirection(String),
}

/// The raw data source could not deliver a usable list of flight records.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("request to flight source timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("flight source unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("flight source returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to read flight source '{path}': {cause}")]
    Io {
        path: String,
        cause: std::io::Error,
    },
    #[error("malformed flight payload: {0}")]
    Malformed(String),
}

/// A single raw record that could not be turned into a canonical flight.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("record is not a JSON object (found {0})")]
    NotAnObject(&'static str),
    #[error("record has unexpected field types: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Request-level failure, mapped onto an HTTP-like status code.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}

impl RequestError {
    /// 400 for bad parameters, 500 for everything that happened after validation.
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::Validation(_) => 400,
            RequestError::Acquisition(_) => 500,
        }
    }
}

/// Error body returned in place of a report.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&RequestError> for ErrorResponse {
    fn from(err: &RequestError) -> Self {
        let error = match err {
            RequestError::Validation(_) => "Invalid parameters",
            RequestError::Acquisition(_) => "Failed to fetch flight data",
        };

        ErrorResponse {
            error: error.to_string(),
            message: err.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Liveness body for the `health` command.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
