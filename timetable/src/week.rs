//! Groups events into the weekdays of one ISO week

use serde::Serialize;
use time::{Date, OffsetDateTime, Weekday};

use crate::{Error, Event, Result};

/// The days shown in a timetable, in order.
pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

/// The events of one weekday, ordered by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub weekday: Weekday,
    pub events: Vec<Event>,
}

/// Events of one ISO week, split by weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    number: u8,
    days: [DayBucket; 5],
}

impl Week {
    /// Keep the events starting Monday to Friday of ISO week `number`.
    ///
    /// Only the week number is compared, not the year. Input order is kept within each day, so
    /// `events` should already be sorted.
    pub fn bucket(events: impl IntoIterator<Item = Event>, number: u8) -> Self {
        let mut days = WEEKDAYS.map(|weekday| DayBucket {
            weekday,
            events: vec![],
        });
        for event in events {
            let date = event.start().date();
            if date.iso_week() != number {
                continue;
            }
            // weekend events are dropped
            if let Some(idx) = weekday_index(date.weekday()) {
                days[idx].events.push(event);
            }
        }
        Self { number, days }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Monday to Friday
    pub fn days(&self) -> &[DayBucket] {
        &self.days
    }

    /// `None` for Saturday and Sunday
    pub fn day(&self, weekday: Weekday) -> Option<&DayBucket> {
        weekday_index(weekday).map(|idx| &self.days[idx])
    }

    /// All events of the week, Monday first.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.days.iter().flat_map(|day| &day.events)
    }
}

fn weekday_index(weekday: Weekday) -> Option<usize> {
    WEEKDAYS.iter().position(|day| *day == weekday)
}

/// Calendar date of `weekday` in ISO week `week` of `year`.
pub fn week_date(year: i32, week: u8, weekday: Weekday) -> Result<Date> {
    Date::from_iso_week_date(year, week, weekday).map_err(|_| Error::InvalidWeek { year, week })
}

/// Local time if the offset can be determined, UTC otherwise.
fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// ISO week number of today.
pub fn current_week() -> u8 {
    now().iso_week()
}

/// ISO week-numbering year of today, which differs from the calendar year around new year.
pub fn current_year() -> i32 {
    now().to_iso_week_date().0
}

#[cfg(test)]
mod tests {
    use time::{
        PrimitiveDateTime, Weekday,
        macros::{date, datetime},
    };

    use super::{Week, week_date};
    use crate::{Error, Event, data::EventInterval};

    fn lecture(course: &str, start: PrimitiveDateTime) -> Event {
        let end = start + time::Duration::hours(1);
        Event::new(course, "", EventInterval::new(start, end).unwrap())
    }

    #[test]
    fn buckets_by_weekday() {
        // ISO week 10 of 2024 is 4-10 March
        let events = vec![
            lecture("MON1", datetime!(2024-03-04 08:00)),
            lecture("MON2", datetime!(2024-03-04 13:00)),
            lecture("WED", datetime!(2024-03-06 10:00)),
            lecture("FRI", datetime!(2024-03-08 15:00)),
        ];
        let week = Week::bucket(events, 10);
        assert_eq!(week.number(), 10);
        let courses = |weekday| -> Vec<String> {
            week.day(weekday)
                .unwrap()
                .events
                .iter()
                .map(|event| event.course().to_owned())
                .collect()
        };
        assert_eq!(courses(Weekday::Monday), ["MON1", "MON2"]);
        assert!(courses(Weekday::Tuesday).is_empty());
        assert_eq!(courses(Weekday::Wednesday), ["WED"]);
        assert!(courses(Weekday::Thursday).is_empty());
        assert_eq!(courses(Weekday::Friday), ["FRI"]);
    }

    #[test]
    fn other_weeks_and_weekends_are_dropped() {
        let events = vec![
            lecture("PREV", datetime!(2024-03-01 10:00)),
            lecture("SAT", datetime!(2024-03-09 10:00)),
            lecture("SUN", datetime!(2024-03-10 10:00)),
            lecture("NEXT", datetime!(2024-03-11 10:00)),
            lecture("TUE", datetime!(2024-03-05 10:00)),
        ];
        let total = events.len();
        let week = Week::bucket(events, 10);
        let kept: Vec<_> = week.events().map(Event::course).collect();
        assert_eq!(kept, ["TUE"]);
        assert!(week.events().count() <= total);
        assert!(week.day(Weekday::Saturday).is_none());
    }

    #[test]
    fn every_event_in_at_most_one_day() {
        let events: Vec<_> = (0..14)
            .map(|offset| lecture("X", datetime!(2024-03-02 09:00) + time::Duration::days(offset)))
            .collect();
        let week = Week::bucket(events.clone(), 10);
        for event in &events {
            let hits = week
                .days()
                .iter()
                .filter(|day| day.events.contains(event))
                .count();
            assert!(hits <= 1);
        }
        // Monday 4th to Friday 8th
        assert_eq!(week.events().count(), 5);
        assert!(week.days().iter().all(|day| day.events.len() == 1));
    }

    #[test]
    fn same_week_number_in_another_year_matches() {
        let events = vec![lecture("OLD", datetime!(2023-03-06 10:00))];
        let week = Week::bucket(events, 10);
        assert_eq!(week.day(Weekday::Monday).unwrap().events.len(), 1);
    }

    #[test]
    fn dates_of_week() {
        assert_eq!(week_date(2024, 10, Weekday::Monday).unwrap(), date!(2024-03-04));
        assert_eq!(week_date(2024, 10, Weekday::Friday).unwrap(), date!(2024-03-08));
        // 2020 has 53 ISO weeks, 2021 doesn't
        assert_eq!(week_date(2020, 53, Weekday::Friday).unwrap(), date!(2021-01-01));
        assert!(matches!(
            week_date(2021, 53, Weekday::Monday),
            Err(Error::InvalidWeek {
                year: 2021,
                week: 53
            })
        ));
        assert!(matches!(
            week_date(2024, 0, Weekday::Monday),
            Err(Error::InvalidWeek { .. })
        ));
        assert!(matches!(
            week_date(2020, 54, Weekday::Monday),
            Err(Error::InvalidWeek { .. })
        ));
    }

    #[test]
    fn serializes_by_day() {
        let week = Week::bucket(vec![lecture("CS101", datetime!(2024-03-05 10:00))], 10);
        let value = serde_json::to_value(&week).unwrap();
        assert_eq!(value["number"], 10);
        assert_eq!(value["days"].as_array().unwrap().len(), 5);
        assert!(value["days"][0]["events"].as_array().unwrap().is_empty());
        assert_eq!(value["days"][1]["events"][0]["course"], "CS101");
    }

    #[test]
    fn current_week_is_valid() {
        assert!((1..=53).contains(&super::current_week()));
    }

    #[test]
    fn current_week_resolves_in_current_year() {
        let (year, week, _) = super::now().to_iso_week_date();
        assert_eq!(super::current_year(), year);
        assert!(week_date(year, week, Weekday::Monday).is_ok());
    }
}
