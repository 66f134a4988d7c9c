use crate::analyzers::types::{
    Aggregate, HourCount, HourlyCounts, PeakHours, Report, ReportMetadata, StatusCounts,
    hour_label,
};
use crate::analyzers::utility::{parse_hour, push_unique};
use crate::flight::{Flight, FlightStatus};
use crate::query::FlightQuery;
use chrono::Utc;

/// Number of normalised flights echoed back in a report for diagnostics.
pub const SAMPLE_SIZE: usize = 5;

pub const REPORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarises a list of canonical flights.
///
/// Flights whose scheduled time has no parsable hour still count towards
/// statuses, airlines and locations but are left out of the hourly buckets.
/// Peak is the busiest hour; trough is the quietest hour that had any
/// flights at all. Ties go to the earliest hour.
pub fn aggregate(flights: &[Flight]) -> Aggregate {
    let mut status_counts = StatusCounts::default();
    let mut airlines = Vec::new();
    let mut locations = Vec::new();
    let mut hourly = HourlyCounts::default();

    for flight in flights {
        match flight.status {
            FlightStatus::OnTime => status_counts.on_time += 1,
            FlightStatus::Delayed => status_counts.delayed += 1,
            FlightStatus::Cancelled => status_counts.cancelled += 1,
        }

        push_unique(&mut airlines, &flight.airline);
        push_unique(&mut locations, &flight.location);

        if let Some(hour) = parse_hour(&flight.scheduled_time) {
            hourly.0[hour].record(flight.terminal);
        }
    }

    let mut peak = (0, 0);
    let mut trough: Option<(usize, usize)> = None;

    for (hour, bucket) in hourly.iter() {
        if bucket.total > peak.1 {
            peak = (hour, bucket.total);
        }
        if bucket.total > 0 && trough.is_none_or(|(_, count)| bucket.total < count) {
            trough = Some((hour, bucket.total));
        }
    }
    let trough = trough.unwrap_or((0, 0));

    Aggregate {
        status_counts,
        airlines,
        locations,
        hourly,
        peak: HourCount {
            hour: hour_label(peak.0),
            count: peak.1,
        },
        trough: HourCount {
            hour: hour_label(trough.0),
            count: trough.1,
        },
    }
}

/// Inputs to [`assemble`] that come from the request rather than the flights.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub query: &'a FlightQuery,
    pub source: &'a str,
    pub reported_total: Option<u64>,
    pub skipped_records: usize,
}

/// Composes the final report from the request context, flights and their aggregate.
pub fn assemble(ctx: ReportContext<'_>, flights: &[Flight], aggregate: Aggregate) -> Report {
    let now = Utc::now();

    Report {
        date: ctx.query.date,
        flight_type: ctx.query.flight_type,
        flight_direction: ctx.query.flight_direction,
        total_flights: flights.len(),
        flight_count: aggregate.hourly,
        flight_statuses: aggregate.status_counts,
        peak_hours: PeakHours {
            max_flights: aggregate.peak,
            lowest_flights: aggregate.trough,
        },
        airlines: aggregate.airlines,
        locations: aggregate.locations,
        sample_flights: flights.iter().take(SAMPLE_SIZE).cloned().collect(),
        metadata: ReportMetadata {
            processed_at: now,
            version: REPORT_VERSION.to_string(),
            source: ctx.source.to_string(),
            reported_total: ctx.reported_total,
            skipped_records: ctx.skipped_records,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::HourBucket;
    use crate::flight::Terminal;
    use crate::normalize::terminal_for;
    use crate::query::{DateSelector, FlightDirection, FlightType};
    use chrono::NaiveDate;

    fn flight(time: &str, airline: &str, status: FlightStatus) -> Flight {
        Flight {
            scheduled_time: time.to_string(),
            status,
            airline: airline.to_string(),
            terminal: terminal_for(airline),
            ..Default::default()
        }
    }

    fn scenario() -> Vec<Flight> {
        vec![
            flight("09:15", "qantas", FlightStatus::OnTime),
            flight("09:40", "jetstar", FlightStatus::Delayed),
            flight("14:05", "qantas", FlightStatus::Cancelled),
        ]
    }

    fn query() -> FlightQuery {
        FlightQuery {
            selector: DateSelector::Today,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            flight_type: FlightType::Domestic,
            flight_direction: Some(FlightDirection::Arrival),
        }
    }

    fn context(query: &FlightQuery) -> ReportContext<'_> {
        ReportContext {
            query,
            source: "test",
            reported_total: None,
            skipped_records: 0,
        }
    }

    #[test]
    fn test_aggregate_empty() {
        let agg = aggregate(&[]);

        assert_eq!(agg.hourly.iter().count(), 24);
        assert!(agg.hourly.iter().all(|(_, b)| *b == HourBucket::default()));
        assert_eq!(agg.status_counts, StatusCounts::default());
        assert_eq!(agg.peak, HourCount { hour: "0-1".into(), count: 0 });
        assert_eq!(agg.trough, HourCount { hour: "0-1".into(), count: 0 });
        assert!(agg.airlines.is_empty());
        assert!(agg.locations.is_empty());
    }

    #[test]
    fn test_aggregate_scenario() {
        let agg = aggregate(&scenario());

        assert_eq!(agg.hourly.get(9), Some(&HourBucket { t2: 1, t3: 1, total: 2 }));
        assert_eq!(agg.hourly.get(14), Some(&HourBucket { t2: 0, t3: 1, total: 1 }));
        assert_eq!(
            agg.status_counts,
            StatusCounts { on_time: 1, cancelled: 1, delayed: 1 }
        );
        assert_eq!(agg.peak, HourCount { hour: "9-10".into(), count: 2 });
        assert_eq!(agg.trough, HourCount { hour: "14-15".into(), count: 1 });
        assert_eq!(agg.airlines, vec!["qantas", "jetstar"]);
    }

    #[test]
    fn test_ties_go_to_earliest_hour() {
        let flights = vec![
            flight("18:00", "jetstar", FlightStatus::OnTime),
            flight("07:00", "jetstar", FlightStatus::OnTime),
            flight("12:00", "jetstar", FlightStatus::OnTime),
            flight("12:30", "jetstar", FlightStatus::OnTime),
            flight("20:00", "jetstar", FlightStatus::OnTime),
            flight("20:30", "jetstar", FlightStatus::OnTime),
        ];
        let agg = aggregate(&flights);

        assert_eq!(agg.peak, HourCount { hour: "12-13".into(), count: 2 });
        assert_eq!(agg.trough, HourCount { hour: "7-8".into(), count: 1 });
    }

    #[test]
    fn test_unparsable_times_skip_histogram_only() {
        let flights = vec![
            flight("", "qantas", FlightStatus::OnTime),
            flight("TBA", "qantas", FlightStatus::Delayed),
            flight("25:00", "jetstar", FlightStatus::OnTime),
            flight("06:10", "jetstar", FlightStatus::OnTime),
        ];
        let agg = aggregate(&flights);

        assert_eq!(agg.hourly.total(), 1);
        assert_eq!(agg.status_counts.on_time, 3);
        assert_eq!(agg.status_counts.delayed, 1);
        assert_eq!(agg.trough, HourCount { hour: "6-7".into(), count: 1 });
    }

    #[test]
    fn test_histogram_is_order_invariant() {
        let mut flights = scenario();
        flights.push(flight("22:45", "virgin", FlightStatus::OnTime));
        let forward = aggregate(&flights);

        flights.reverse();
        let reversed = aggregate(&flights);

        assert_eq!(forward.hourly, reversed.hourly);
        assert_eq!(forward.status_counts, reversed.status_counts);
        assert_eq!(forward.peak, reversed.peak);
        assert_eq!(forward.trough, reversed.trough);
    }

    #[test]
    fn test_unique_sets_exclude_empty_values() {
        let mut flights = scenario();
        flights[0].location = "Melbourne".into();
        flights[1].location = "Perth, Darwin".into();
        flights[2].location = "Melbourne".into();
        flights.push(flight("10:00", "", FlightStatus::OnTime));

        let agg = aggregate(&flights);
        assert_eq!(agg.airlines, vec!["qantas", "jetstar"]);
        assert_eq!(agg.locations, vec!["Melbourne", "Perth, Darwin"]);
    }

    #[test]
    fn test_assemble_keeps_first_five_in_source_order() {
        let flights: Vec<Flight> = (0..8)
            .map(|i| flight(&format!("{:02}:00", 20 - i), "jetstar", FlightStatus::OnTime))
            .collect();
        let q = query();
        let report = assemble(context(&q), &flights, aggregate(&flights));

        assert_eq!(report.total_flights, 8);
        assert_eq!(report.sample_flights.len(), SAMPLE_SIZE);
        assert_eq!(report.sample_flights[0].scheduled_time, "20:00");
        assert_eq!(report.sample_flights[4].scheduled_time, "16:00");
        assert_eq!(report.metadata.version, REPORT_VERSION);
    }

    #[test]
    fn test_report_json_shape() {
        let flights = scenario();
        let q = query();
        let report = assemble(context(&q), &flights, aggregate(&flights));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["flight_type"], "domestic");
        assert_eq!(json["flight_direction"], "arrival");
        assert_eq!(json["total_flights"], 3);
        assert_eq!(json["flight_count"]["9-10"]["T3"], 1);
        assert_eq!(json["flight_count"].as_object().unwrap().len(), 24);
        assert_eq!(json["flight_statuses"]["cancelled"], 1);
        assert_eq!(json["peak_hours"]["max_flights"]["hour"], "9-10");
        assert_eq!(json["peak_hours"]["lowest_flights"]["count"], 1);
        assert_eq!(json["sample_flights"][1]["terminal"], "T2");
        assert!(json["metadata"]["processed_at"].is_string());
    }

    #[test]
    fn test_direction_is_omitted_when_absent() {
        let mut q = query();
        q.flight_direction = None;
        let report = assemble(context(&q), &[], aggregate(&[]));
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("flight_direction").is_none());
        assert_eq!(
            report.peak_hours.lowest_flights,
            HourCount { hour: "0-1".into(), count: 0 }
        );
        assert_eq!(report.flight_count.iter().filter(|(_, b)| b.total == 0).count(), 24);
    }

    #[test]
    fn test_terminal_split_matches_rule() {
        let agg = aggregate(&[flight("08:00", "qantas airways", FlightStatus::OnTime)]);
        assert_eq!(agg.hourly.get(8).map(|b| b.t3), Some(1));
        assert_eq!(terminal_for("qantas airways"), Terminal::T3);
    }
}
