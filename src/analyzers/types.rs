//! Data types produced by the aggregation pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::flight::{Flight, Terminal};
use crate::query::{FlightDirection, FlightType};

pub const HOURS_PER_DAY: usize = 24;

/// Flights scheduled within one hour, split by terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    #[serde(rename = "T2")]
    pub t2: usize,
    #[serde(rename = "T3")]
    pub t3: usize,
    pub total: usize,
}

impl HourBucket {
    pub fn record(&mut self, terminal: Terminal) {
        match terminal {
            Terminal::T2 => self.t2 += 1,
            Terminal::T3 => self.t3 += 1,
        }
        self.total += 1;
    }
}

/// All 24 hour buckets of a day, serialised as `{"0-1": {...}, ..., "23-24": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourlyCounts(pub [HourBucket; HOURS_PER_DAY]);

impl HourlyCounts {
    pub fn get(&self, hour: usize) -> Option<&HourBucket> {
        self.0.get(hour)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &HourBucket)> {
        self.0.iter().enumerate()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|b| b.total).sum()
    }
}

impl Serialize for HourlyCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(HOURS_PER_DAY))?;
        for (hour, bucket) in self.iter() {
            map.serialize_entry(&hour_label(hour), bucket)?;
        }
        map.end()
    }
}

/// Label for the hour starting at `hour`, e.g. `9` → `"9-10"`.
pub fn hour_label(hour: usize) -> String {
    format!("{}-{}", hour, hour + 1)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub on_time: usize,
    pub cancelled: usize,
    pub delayed: usize,
}

/// One hour and how many flights fell in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourCount {
    pub hour: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeakHours {
    pub max_flights: HourCount,
    pub lowest_flights: HourCount,
}

/// Everything computed from a flight list, before request metadata is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub status_counts: StatusCounts,
    pub airlines: Vec<String>,
    pub locations: Vec<String>,
    pub hourly: HourlyCounts,
    pub peak: HourCount,
    pub trough: HourCount,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub processed_at: DateTime<Utc>,
    pub version: String,
    pub source: String,
    /// Flight count claimed by the upstream payload, if it sent one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_total: Option<u64>,
    pub skipped_records: usize,
}

/// Response payload for a single flight-summary request.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub date: NaiveDate,
    pub flight_type: FlightType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_direction: Option<FlightDirection>,
    pub total_flights: usize,
    pub flight_count: HourlyCounts,
    pub flight_statuses: StatusCounts,
    pub peak_hours: PeakHours,
    pub airlines: Vec<String>,
    pub locations: Vec<String>,
    pub sample_flights: Vec<Flight>,
    pub metadata: ReportMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label(0), "0-1");
        assert_eq!(hour_label(9), "9-10");
        assert_eq!(hour_label(23), "23-24");
    }

    #[test]
    fn test_hourly_counts_serialize_in_hour_order() {
        let mut hourly = HourlyCounts::default();
        hourly.0[10].record(Terminal::T3);

        let json = serde_json::to_string(&hourly).unwrap();
        let first = json.find("\"2-3\"").unwrap();
        let later = json.find("\"10-11\"").unwrap();
        assert!(first < later);
        assert!(json.contains(r#""10-11":{"T2":0,"T3":1,"total":1}"#));
    }

    #[test]
    fn test_bucket_record() {
        let mut bucket = HourBucket::default();
        bucket.record(Terminal::T2);
        bucket.record(Terminal::T3);
        bucket.record(Terminal::T3);
        assert_eq!(bucket, HourBucket { t2: 1, t3: 2, total: 3 });
    }
}
