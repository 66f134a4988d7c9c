use super::types::HOURS_PER_DAY;

/// Parses the hour from the leading `:`-delimited token of a time string.
/// Returns `None` for empty, non-numeric or out-of-range values.
pub fn parse_hour(scheduled_time: &str) -> Option<usize> {
    let (head, _) = scheduled_time.split_once(':')?;
    let hour: usize = head.trim().parse().ok()?;
    (hour < HOURS_PER_DAY).then_some(hour)
}

/// Appends `value` unless it is empty or already present, keeping first-seen order.
pub fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
