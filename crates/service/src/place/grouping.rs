//! Compact weekly view: days with identical intervals collapse into one
//! line such as `Monday - Friday: 08:00 - 12:00, 13:00 - 17:00`.

use super::domain::{DayOfWeek, GroupedOpeningDay, GroupedPlace, OpeningHours, PlaceRecord};

pub const CLOSED: &str = "closed";

/// Rendered intervals of one day, sorted by start time.
fn day_intervals(hours: &OpeningHours, day: DayOfWeek) -> Vec<String> {
    let mut opens: Vec<_> = hours.days.get(&day).map(|v| v.iter().collect()).unwrap_or_default();
    if opens.is_empty() {
        return vec![CLOSED.to_string()];
    }
    opens.sort_by(|a, b| a.start.cmp(&b.start));
    opens.into_iter().map(|o| format!("{} - {}", o.start, o.end)).collect()
}

fn signature(intervals: &[String]) -> String {
    intervals.join(", ")
}

fn label(first: DayOfWeek, last: DayOfWeek) -> String {
    if first == last {
        first.display_name().to_string()
    } else {
        format!("{} - {}", first.display_name(), last.display_name())
    }
}

/// Days sharing a signature form one group, wherever they fall in the week.
/// Groups come out in order of their first day and are labelled by their
/// first and last day.
pub fn group_week(hours: &OpeningHours) -> Vec<GroupedOpeningDay> {
    // (signature, days, intervals) in first-seen order
    let mut groups: Vec<(String, Vec<DayOfWeek>, Vec<String>)> = Vec::new();
    for day in DayOfWeek::ALL {
        let intervals = day_intervals(hours, day);
        let key = signature(&intervals);
        match groups.iter_mut().find(|(sig, _, _)| *sig == key) {
            Some((_, days, _)) => days.push(day),
            None => groups.push((key, vec![day], intervals)),
        }
    }
    groups
        .into_iter()
        .map(|(_, days, intervals)| {
            let first = days[0];
            let last = days[days.len() - 1];
            GroupedOpeningDay { day: label(first, last), intervals }
        })
        .collect()
}

pub fn group_place(record: &PlaceRecord) -> GroupedPlace {
    let empty = OpeningHours::default();
    GroupedPlace {
        id: record.id.unwrap_or_default(),
        label: record.label.clone(),
        location: record.location.clone(),
        opening_hours: group_week(record.opening_hours.as_ref().unwrap_or(&empty)),
    }
}
