//! Request parameters and their validation.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Relative day selector accepted by the `date` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSelector {
    Today,
    Yesterday,
    Tomorrow,
    DayAfterTomorrow,
}

impl DateSelector {
    /// Offset in days from the current calendar date.
    pub fn offset_days(self) -> i64 {
        match self {
            DateSelector::Today => 0,
            DateSelector::Yesterday => -1,
            DateSelector::Tomorrow => 1,
            DateSelector::DayAfterTomorrow => 2,
        }
    }

    /// Maps the selector onto a concrete date relative to `today`.
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        let offset = self.offset_days();
        let shifted = if offset < 0 {
            today.checked_sub_days(Days::new(offset.unsigned_abs()))
        } else {
            today.checked_add_days(Days::new(offset as u64))
        };
        // Only fails at the edges of chrono's calendar range.
        shifted.unwrap_or(today)
    }
}

impl FromStr for DateSelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DateSelector::Today),
            "yesterday" => Ok(DateSelector::Yesterday),
            "tomorrow" => Ok(DateSelector::Tomorrow),
            "day_after_tomorrow" => Ok(DateSelector::DayAfterTomorrow),
            other => Err(ValidationError::Date(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightType {
    Domestic,
    International,
}

impl FlightType {
    pub fn as_str(self) -> &'static str {
        match self {
            FlightType::Domestic => "domestic",
            FlightType::International => "international",
        }
    }
}

impl FromStr for FlightType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domestic" => Ok(FlightType::Domestic),
            "international" => Ok(FlightType::International),
            other => Err(ValidationError::FlightType(other.to_string())),
        }
    }
}

impl fmt::Display for FlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightDirection {
    Arrival,
    Departure,
}

impl FlightDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            FlightDirection::Arrival => "arrival",
            FlightDirection::Departure => "departure",
        }
    }
}

impl FromStr for FlightDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrival" => Ok(FlightDirection::Arrival),
            "departure" => Ok(FlightDirection::Departure),
            other => Err(ValidationError::FlightDirection(other.to_string())),
        }
    }
}

impl fmt::Display for FlightDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated request parameters exactly as the caller supplied them.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    pub date: String,
    pub flight_type: String,
    pub flight_direction: Option<String>,
}

/// A validated request, with the date already resolved to a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub selector: DateSelector,
    pub date: NaiveDate,
    pub flight_type: FlightType,
    pub flight_direction: Option<FlightDirection>,
}

impl FlightQuery {
    /// Validates all parameters and resolves the date against `today`.
    ///
    /// An empty direction is treated as absent.
    pub fn parse(params: &RawParams, today: NaiveDate) -> Result<Self, ValidationError> {
        let selector: DateSelector = params.date.parse()?;
        let flight_type: FlightType = params.flight_type.parse()?;
        let flight_direction = match params.flight_direction.as_deref() {
            None | Some("") => None,
            Some(direction) => Some(direction.parse()?),
        };

        Ok(FlightQuery {
            selector,
            date: selector.resolve(today),
            flight_type,
            flight_direction,
        })
    }

    /// Date in the `YYYY-MM-DD` form the upstream source expects.
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn params(date: &str, flight_type: &str, direction: Option<&str>) -> RawParams {
        RawParams {
            date: date.to_string(),
            flight_type: flight_type.to_string(),
            flight_direction: direction.map(str::to_string),
        }
    }

    #[test]
    fn test_date_selector_offsets() {
        let today = day(2024, 12, 31);
        assert_eq!(DateSelector::Today.resolve(today), day(2024, 12, 31));
        assert_eq!(DateSelector::Yesterday.resolve(today), day(2024, 12, 30));
        assert_eq!(DateSelector::Tomorrow.resolve(today), day(2025, 1, 1));
        assert_eq!(DateSelector::DayAfterTomorrow.resolve(today), day(2025, 1, 2));
    }

    #[test]
    fn test_parse_valid_query() {
        let query = FlightQuery::parse(
            &params("yesterday", "international", Some("departure")),
            day(2024, 3, 1),
        )
        .unwrap();

        assert_eq!(query.selector, DateSelector::Yesterday);
        assert_eq!(query.date_param(), "2024-02-29");
        assert_eq!(query.flight_type, FlightType::International);
        assert_eq!(query.flight_direction, Some(FlightDirection::Departure));
    }

    #[test]
    fn test_empty_direction_is_absent() {
        let query =
            FlightQuery::parse(&params("today", "domestic", Some("")), day(2024, 3, 1)).unwrap();
        assert_eq!(query.flight_direction, None);
    }

    #[test]
    fn test_invalid_flight_type() {
        let err = FlightQuery::parse(&params("today", "domestic2", None), day(2024, 3, 1))
            .unwrap_err();
        assert_eq!(err, ValidationError::FlightType("domestic2".into()));
    }

    #[test]
    fn test_invalid_date_and_direction() {
        let today = day(2024, 3, 1);
        assert!(matches!(
            FlightQuery::parse(&params("next_week", "domestic", None), today),
            Err(ValidationError::Date(_))
        ));
        assert!(matches!(
            FlightQuery::parse(&params("today", "domestic", Some("sideways")), today),
            Err(ValidationError::FlightDirection(_))
        ));
    }

    #[test]
    fn test_parameters_are_case_sensitive() {
        assert!("Domestic".parse::<FlightType>().is_err());
        assert!("TODAY".parse::<DateSelector>().is_err());
    }
}
