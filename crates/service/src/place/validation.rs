//! Payload checks for [`PlaceRecord`]. Every rule is evaluated and all
//! violations are reported together.

use chrono::NaiveTime;

use super::domain::{OpenInterval, PlaceRecord};

pub const LABEL_MANDATORY: &str = "Label is mandatory";
pub const LOCATION_MANDATORY: &str = "Location is mandatory";
pub const OPENING_HOURS_MANDATORY: &str = "OpeningHours is mandatory";
pub const DAYS_EMPTY: &str = "Days map cannot be empty";
pub const INTERVALS_EMPTY: &str = "Interval list cannot be empty";
pub const START_REQUIRED: &str = "Start time is required";
pub const END_REQUIRED: &str = "End time is required";
pub const START_FORMAT: &str = "Start time must be in format HH:mm";
pub const END_FORMAT: &str = "End time must be in format HH:mm";
pub const TYPE_REQUIRED: &str = "Type is required";
pub const START_BEFORE_END: &str = "Start time must be before end time";
pub const EMPTY_PLACE_LIST: &str = "Provide at least one location.";
pub const ID_MANDATORY: &str = "Id is mandatory for update";

/// Parse a strict `HH:mm` time of day (two digits each, 00-23 / 00-59).
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let b = value.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return None;
    }
    if ![b[0], b[1], b[3], b[4]].iter().all(u8::is_ascii_digit) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// `00:00` as an end time closes the day and is accepted after any start.
fn starts_before_end(start: NaiveTime, end: NaiveTime) -> bool {
    if start == end {
        return false;
    }
    end == NaiveTime::MIN || start < end
}

pub fn validate_interval(interval: &OpenInterval, out: &mut Vec<String>) {
    let start = check_time(&interval.start, START_REQUIRED, START_FORMAT, out);
    let end = check_time(&interval.end, END_REQUIRED, END_FORMAT, out);
    if interval.kind.trim().is_empty() {
        out.push(TYPE_REQUIRED.to_string());
    }
    if let (Some(s), Some(e)) = (start, end) {
        if !starts_before_end(s, e) {
            out.push(START_BEFORE_END.to_string());
        }
    }
}

fn check_time(value: &str, required: &str, format: &str, out: &mut Vec<String>) -> Option<NaiveTime> {
    if value.trim().is_empty() {
        out.push(required.to_string());
        return None;
    }
    let parsed = parse_time(value);
    if parsed.is_none() {
        out.push(format.to_string());
    }
    parsed
}

/// Violations of a single record, in field order.
pub fn validate_record(record: &PlaceRecord) -> Vec<String> {
    let mut out = Vec::new();
    if record.label.trim().is_empty() {
        out.push(LABEL_MANDATORY.to_string());
    }
    if record.location.trim().is_empty() {
        out.push(LOCATION_MANDATORY.to_string());
    }
    match &record.opening_hours {
        None => out.push(OPENING_HOURS_MANDATORY.to_string()),
        Some(hours) if hours.days.is_empty() => out.push(DAYS_EMPTY.to_string()),
        Some(hours) => {
            for intervals in hours.days.values() {
                if intervals.is_empty() {
                    out.push(INTERVALS_EMPTY.to_string());
                }
                for interval in intervals {
                    validate_interval(interval, &mut out);
                }
            }
        }
    }
    out
}

/// Checks a create payload: non-empty list and every record valid.
pub fn validate_new_places(records: &[PlaceRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec![EMPTY_PLACE_LIST.to_string()];
    }
    records.iter().flat_map(validate_record).collect()
}

/// Checks an update payload: id present and the record valid.
pub fn validate_update(record: &PlaceRecord) -> Vec<String> {
    let mut out = Vec::new();
    if record.id.is_none() {
        out.push(ID_MANDATORY.to_string());
    }
    out.extend(validate_record(record));
    out
}
