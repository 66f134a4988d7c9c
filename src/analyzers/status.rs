use chrono::NaiveTime;

use crate::flight::FlightStatus;
use crate::normalize::canonical_time;

/// Severity signalled by the colour or CSS class of a status badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeverityHint {
    #[default]
    None,
    Medium,
    High,
}

impl SeverityHint {
    /// Reads a marker such as `"red"`, `"status--amber"` or `"badge-warning"`.
    ///
    /// The marker is split into words on whitespace, `-` and `_`; only whole
    /// words count, so `text-centered` is not read as `red`.
    pub fn from_marker(marker: Option<&str>) -> Self {
        let Some(marker) = marker else {
            return SeverityHint::None;
        };
        let marker = marker.to_lowercase();
        let words: Vec<&str> = marker
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|w| !w.is_empty())
            .collect();

        if matches_any(&words, &["red", "danger", "critical"], "cancel") {
            SeverityHint::High
        } else if matches_any(&words, &["amber", "orange", "yellow", "warning"], "delay") {
            SeverityHint::Medium
        } else {
            SeverityHint::None
        }
    }
}

fn matches_any(words: &[&str], exact: &[&str], prefix: &str) -> bool {
    words
        .iter()
        .any(|w| exact.contains(w) || w.starts_with(prefix))
}

/// Reads `H:MM`, `HH:MM` or `HH:MM:SS` as a wall-clock time.
fn clock_time(text: &str) -> Option<NaiveTime> {
    let (hour, rest) = text.split_once(':')?;
    let minute = rest.get(..2)?;
    NaiveTime::from_hms_opt(hour.trim().parse().ok()?, minute.parse().ok()?, 0)
}

const PLACEHOLDERS: &[&str] = &["", "-", "--", "tba", "tbc", "n/a"];

/// True when an estimated time is present and differs from the scheduled one.
///
/// Best-effort: a changed estimate is read as a delay even when the
/// source would not call it one.
pub fn has_delay_hint(scheduled: &str, estimated: Option<&str>) -> bool {
    let Some(estimated) = estimated else {
        return false;
    };
    let estimated = canonical_time(estimated);
    if PLACEHOLDERS.contains(&estimated.to_lowercase().as_str()) {
        return false;
    }

    let scheduled = canonical_time(scheduled);
    match (clock_time(&estimated), clock_time(&scheduled)) {
        (Some(estimated), Some(scheduled)) => estimated != scheduled,
        _ => estimated != scheduled,
    }
}

/// Maps raw status text and hints onto one of the three canonical statuses.
///
/// | Condition                                        | Status      |
/// |--------------------------------------------------|-------------|
/// | text contains `cancel`, or high severity         | `cancelled` |
/// | text contains `delay`, medium severity, or hint  | `delayed`   |
/// | anything else                                    | `on_time`   |
pub fn classify(raw_status: &str, severity: SeverityHint, delay_hint: bool) -> FlightStatus {
    let text = raw_status.to_lowercase();

    match severity {
        _ if text.contains("cancel") => FlightStatus::Cancelled,
        SeverityHint::High => FlightStatus::Cancelled,
        _ if text.contains("delay") => FlightStatus::Delayed,
        SeverityHint::Medium => FlightStatus::Delayed,
        _ if delay_hint => FlightStatus::Delayed,
        _ => FlightStatus::OnTime,
    }
}
