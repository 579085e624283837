use thiserror::Error;
use time::Weekday;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can stop a timetable from being shown.
///
/// None of these are recoverable: the schedule is either shown in full or not at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't fetch the calendar feed")]
    Fetch(#[from] reqwest::Error),
    #[error("couldn't read the calendar feed")]
    Io(#[from] std::io::Error),
    #[error("invalid calendar")]
    Syntax(#[from] icalendar::ParserError),
    #[error("malformed event starting at line {line}: {reason}")]
    MalformedEvent { line: usize, reason: String },
    #[error("{active} events share the {hour:02}:00 slot on {weekday}, which can't be laid out")]
    UnsupportedOverlap {
        weekday: Weekday,
        hour: u8,
        active: usize,
    },
    #[error("week {week} does not exist in {year}")]
    InvalidWeek { year: i32, week: u8 },
}
