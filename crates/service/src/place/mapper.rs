use std::collections::BTreeMap;

use models::day_opening::{self, NewDayOpening};
use models::place;
use tracing::warn;

use super::domain::{DayOfWeek, OpenInterval, OpeningHours, PlaceRecord};

/// One row per interval; weekdays are stored upper-case.
pub fn to_rows(hours: &OpeningHours) -> Vec<NewDayOpening> {
    hours
        .days
        .iter()
        .flat_map(|(day, intervals)| {
            intervals.iter().map(move |i| NewDayOpening {
                day_of_week: day.storage_name().to_string(),
                start_time: i.start.clone(),
                end_time: i.end.clone(),
                opening_type: Some(i.kind.clone()).filter(|k| !k.is_empty()),
            })
        })
        .collect()
}

/// Rebuild the weekly map; rows keep their given order within a day.
pub fn to_opening_hours<'a>(rows: impl IntoIterator<Item = &'a day_opening::Model>) -> OpeningHours {
    let mut days: BTreeMap<DayOfWeek, Vec<OpenInterval>> = BTreeMap::new();
    for row in rows {
        let Ok(day) = row.day_of_week.parse::<DayOfWeek>() else {
            warn!(id = row.id, day = %row.day_of_week, "skipping opening with unknown weekday");
            continue;
        };
        days.entry(day).or_default().push(OpenInterval {
            start: row.start_time.clone(),
            end: row.end_time.clone(),
            kind: row.opening_type.clone().unwrap_or_default(),
        });
    }
    OpeningHours { days }
}

pub fn to_record(place: &place::Model, rows: &[day_opening::Model]) -> PlaceRecord {
    PlaceRecord {
        id: Some(place.id),
        label: place.label.clone(),
        location: place.location.clone(),
        opening_hours: Some(to_opening_hours(rows.iter().filter(|r| r.place_id == place.id))),
    }
}
