//! Output formatting for reports and error bodies.
//!
//! Supports pretty-printing to the log and JSON serialization to any writer.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

use crate::analyzers::types::Report;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Logs a one-line summary of a report.
pub fn print_summary(report: &Report) {
    info!(
        date = %report.date,
        flight_type = %report.flight_type,
        total_flights = report.total_flights,
        on_time = report.flight_statuses.on_time,
        delayed = report.flight_statuses.delayed,
        cancelled = report.flight_statuses.cancelled,
        peak_hour = %report.peak_hours.max_flights.hour,
        "Report summary"
    );
}

/// Writes any serializable body as JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate::{ReportContext, aggregate, assemble};
    use crate::error::HealthResponse;
    use crate::query::{DateSelector, FlightQuery, FlightType};
    use chrono::NaiveDate;

    fn empty_report() -> Report {
        let query = FlightQuery {
            selector: DateSelector::Today,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            flight_type: FlightType::Domestic,
            flight_direction: None,
        };
        let ctx = ReportContext {
            query: &query,
            source: "test",
            reported_total: None,
            skipped_records: 0,
        };
        assemble(ctx, &[], aggregate(&[]))
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&empty_report());
        print_summary(&empty_report());
    }

    #[test]
    fn test_write_json_compact_is_one_line() {
        let mut buf = Vec::new();
        write_json(&mut buf, &empty_report(), false).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"total_flights\":0"));
    }

    #[test]
    fn test_write_json_pretty() {
        let mut buf = Vec::new();
        write_json(&mut buf, &HealthResponse::ok(), true).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().count() > 1);
        assert!(text.contains("\"status\": \"ok\""));
    }
}
