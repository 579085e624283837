use std::fmt;

use serde::Serialize;
use thiserror::Error;
use time::{
    PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

type Result<T, E = EventIntervalError> = std::result::Result<T, E>;

const DATETIME_DESC: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const TIME_DESC: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

/// Type representing the start and end time of an event
///
/// Ordered by start, then end.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct EventInterval {
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
}

impl EventInterval {
    pub fn new(start: PrimitiveDateTime, end: PrimitiveDateTime) -> Result<Self> {
        if end < start {
            return Err(EventIntervalError::NegativeRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> PrimitiveDateTime {
        self.start
    }

    pub fn end(&self) -> PrimitiveDateTime {
        self.end
    }
}

impl fmt::Display for EventInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start.format(DATETIME_DESC).map_err(|_| fmt::Error)?;
        // only repeat the date for events running past midnight
        let end = if self.end.date() == self.start.date() {
            self.end.format(TIME_DESC)
        } else {
            self.end.format(DATETIME_DESC)
        }
        .map_err(|_| fmt::Error)?;
        write!(f, "{start} - {end}")
    }
}

#[derive(Debug, Error)]
pub enum EventIntervalError {
    #[error("end time {end} is before start time {start}")]
    NegativeRange {
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    },
}
