//! Turns an iCalendar feed into timetable events

use icalendar::{Component, Line};
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

use crate::{Error, Event, Result, data::EventInterval};

/// Correction added to every feed timestamp.
///
/// The feed marks its times as UTC but they come out one hour behind the timetable. This is a
/// fixed shift rather than a timezone conversion, so times on the other side of a daylight-saving
/// change are off by an hour.
pub const FEED_UTC_OFFSET: Duration = Duration::hours(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    /// Added to every `DTSTART`/`DTEND`
    pub utc_offset: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            utc_offset: FEED_UTC_OFFSET,
        }
    }
}

/// Parse every event in `input`, sorted by start time.
pub fn parse_feed(input: &str) -> Result<Vec<Event>> {
    parse_feed_with(input, FeedOptions::default())
}

/// Like [`parse_feed`] with a non-default timestamp correction.
///
/// Any malformed event fails the whole parse.
pub fn parse_feed_with(input: &str, options: FeedOptions) -> Result<Vec<Event>> {
    let mut events = icalendar::events(input)?
        .iter()
        .map(|component| {
            parse_event(component, options).map_err(|reason| Error::MalformedEvent {
                line: component.line(),
                reason,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    // stable sort: events starting together stay in feed order
    events.sort_by_key(Event::start);
    tracing::debug!(count = events.len(), "parsed feed");
    Ok(events)
}

fn parse_event(component: &Component<'_>, options: FeedOptions) -> Result<Event, String> {
    let start = timestamp(required(component, "DTSTART")?, options)?;
    let end = timestamp(required(component, "DTEND")?, options)?;
    let summary = required(component, "SUMMARY")?;
    let (course, description) = split_summary(&summary.value).ok_or_else(|| {
        format!(
            "SUMMARY `{}` has no `\\` between course and description",
            summary.value
        )
    })?;
    let interval = EventInterval::new(start, end).map_err(|e| e.to_string())?;
    Ok(Event::new(course, description, interval))
}

fn required<'a, 'src>(component: &'a Component<'src>, name: &str) -> Result<&'a Line<'src>, String> {
    component
        .property(name)
        .ok_or_else(|| format!("missing {name}"))
}

/// Read a `YYYYMMDDTHHMMSSZ` value and apply the feed correction.
fn timestamp(line: &Line<'_>, options: FeedOptions) -> Result<PrimitiveDateTime, String> {
    if let Some(tzid) = line.param("TZID") {
        return Err(format!(
            "{} in zone `{}` is not supported, only UTC times are",
            line.name,
            tzid.first_value()
        ));
    }
    let utc = parse_utc_timestamp(&line.value).ok_or_else(|| {
        format!(
            "{} `{}` is not a UTC timestamp (YYYYMMDDTHHMMSSZ)",
            line.name, line.value
        )
    })?;
    utc.checked_add(options.utc_offset)
        .ok_or_else(|| format!("{} `{}` is out of range", line.name, line.value))
}

fn parse_utc_timestamp(input: &str) -> Option<PrimitiveDateTime> {
    let (date, time) = input.strip_suffix('Z')?.split_once('T')?;
    if date.len() != 8
        || time.len() != 6
        || !date.bytes().chain(time.bytes()).all(|b| b.is_ascii_digit())
    {
        return None;
    }
    // all ascii digits, so byte ranges are char boundaries
    let month: u8 = date[4..6].parse().ok()?;
    let date = Date::from_calendar_date(
        date[..4].parse().ok()?,
        Month::try_from(month).ok()?,
        date[6..].parse().ok()?,
    )
    .ok()?;
    let time = Time::from_hms(
        time[..2].parse().ok()?,
        time[2..4].parse().ok()?,
        time[4..].parse().ok()?,
    )
    .ok()?;
    Some(PrimitiveDateTime::new(date, time))
}

/// Split `COURSE\description` on the first backslash.
///
/// In the description, further backslashes become ` - `, commas are dropped and leftover line
/// folds are removed.
fn split_summary(raw: &str) -> Option<(&str, String)> {
    let (course, rest) = raw.split_once('\\')?;
    let description = rest
        .replace('\\', " - ")
        .replace(',', "")
        .replace("\n ", "");
    Some((course, description.trim().to_owned()))
}
