use crate::analyzers::aggregate::{ReportContext, aggregate, assemble};
use crate::analyzers::types::Report;
use crate::error::{AcquisitionError, RequestError};
use crate::flight::RawBatch;
use crate::normalize::normalize_all;
use crate::query::{FlightQuery, RawParams};
use crate::services::flight_source::FlightSource;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{info, warn};

/// Validates parameters, fetches raw flights once, and builds the report.
///
/// Validation failures return before the source is touched. The fetch is the
/// only await point and is bounded by `timeout`; everything after it is
/// synchronous.
#[tracing::instrument(skip(source, params), fields(
    source = source.name(),
    date = %params.date,
    flight_type = %params.flight_type,
))]
pub async fn run_request<S: FlightSource + ?Sized>(
    source: &S,
    params: &RawParams,
    today: NaiveDate,
    timeout: Duration,
) -> Result<Report, RequestError> {
    let query = FlightQuery::parse(params, today).inspect_err(|e| {
        warn!(error = %e, "Rejected flight request");
    })?;

    let fetched = match tokio::time::timeout(timeout, source.fetch_raw_flights(&query)).await {
        Ok(result) => result,
        Err(_) => Err(AcquisitionError::Timeout(timeout)),
    };
    let batch = fetched.inspect_err(|e| warn!(error = %e, "Flight acquisition failed"))?;

    Ok(build_report(&query, source.name(), batch))
}

/// Normalises and aggregates an already-fetched batch.
pub fn build_report(query: &FlightQuery, source: &str, batch: RawBatch) -> Report {
    let reported_total = batch.reported_total;
    let rejected = batch.rejected;
    let normalized = normalize_all(batch.records);
    let summary = aggregate(&normalized.flights);

    info!(
        total_flights = normalized.flights.len(),
        skipped = normalized.skipped + rejected,
        peak_hour = %summary.peak.hour,
        "Flight report built"
    );

    assemble(
        ReportContext {
            query,
            source,
            reported_total,
            skipped_records: normalized.skipped + rejected,
        },
        &normalized.flights,
        summary,
    )
}
