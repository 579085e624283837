//! Lays a day's events out on a grid of hour slots
//!
//! Each hour from [`FIRST_HOUR`] to [`LAST_HOUR`] gets one [`Cell`], decided from the events
//! active during that hour. An event is active for every hour from its start hour up to and
//! including its end hour, so an event ending at 11:00 and one starting at 11:00 are both active
//! at 11. That transition is drawn by starting the new event at 11 and moving the end of the
//! old one onto the 10 o'clock cell, which is the only time a cell is changed after it was
//! placed.

use std::mem;

use serde::Serialize;
use time::{Time, Weekday};

use crate::{Error, Event, Result, week::Week};

pub const FIRST_HOUR: u8 = 8;
pub const LAST_HOUR: u8 = 17;
/// Number of hour slots in a day
pub const HOURS: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// What one hour slot shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cell {
    Empty,
    /// An event starts on the hour
    Start { time: Time, course: String },
    /// An event ends on the hour
    End { time: Time },
    /// An event runs through this hour
    Continuation,
    /// `cell`, followed by the end of an event that ran into the next hour where another event
    /// starts
    Closing { cell: Box<Cell>, end: Time },
}

impl Cell {
    fn start(event: &Event) -> Self {
        Cell::Start {
            time: event.start().time(),
            course: event.course().to_owned(),
        }
    }
}

/// The cells of one weekday, one per hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayLayout {
    weekday: Weekday,
    cells: Vec<Cell>,
}

impl DayLayout {
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Cells from [`FIRST_HOUR`] to [`LAST_HOUR`]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, hour: u8) -> Option<&Cell> {
        let idx = hour.checked_sub(FIRST_HOUR)?;
        self.cells.get(usize::from(idx))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekLayout {
    number: u8,
    days: Vec<DayLayout>,
}

impl WeekLayout {
    /// ISO week number
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Monday to Friday
    pub fn days(&self) -> &[DayLayout] {
        &self.days
    }
}

pub fn layout_week(week: &Week) -> Result<WeekLayout> {
    let days = week
        .days()
        .iter()
        .map(|day| layout_day(day.weekday, &day.events))
        .collect::<Result<_>>()?;
    Ok(WeekLayout {
        number: week.number(),
        days,
    })
}

/// Lay out `events` (sorted by start, all on `weekday`).
///
/// At most two events can be active in an hour, and only when the first one ends as the second
/// starts.
pub fn layout_day(weekday: Weekday, events: &[Event]) -> Result<DayLayout> {
    let mut cells = Vec::with_capacity(HOURS);
    for hour in FIRST_HOUR..=LAST_HOUR {
        let active: Vec<&Event> = events
            .iter()
            .filter(|event| event.is_active_at(hour))
            .collect();
        let cell = match active.as_slice() {
            [] => Cell::Empty,
            [event] => single_event(event, hour),
            [ending, starting] => transition(&mut cells, weekday, hour, ending, starting)?,
            _ => {
                return Err(Error::UnsupportedOverlap {
                    weekday,
                    hour,
                    active: active.len(),
                });
            }
        };
        tracing::trace!(%weekday, hour, ?cell, "placed cell");
        cells.push(cell);
    }
    Ok(DayLayout { weekday, cells })
}

fn single_event(event: &Event, hour: u8) -> Cell {
    if event.starts_at(hour) {
        Cell::start(event)
    } else if event.ends_at(hour) {
        Cell::End {
            time: event.end().time(),
        }
    } else {
        Cell::Continuation
    }
}

/// Cell for an hour where `ending` finishes and `starting` begins.
///
/// `cells` holds the hours placed so far; the last of them gets the end of `ending`. There is no
/// previous hour to amend for [`FIRST_HOUR`], so that is an error.
fn transition(
    cells: &mut [Cell],
    weekday: Weekday,
    hour: u8,
    ending: &Event,
    starting: &Event,
) -> Result<Cell> {
    let Some(previous) = cells.last_mut() else {
        return Err(Error::UnsupportedOverlap {
            weekday,
            hour,
            active: 2,
        });
    };
    let cell = mem::replace(previous, Cell::Empty);
    *previous = Cell::Closing {
        cell: Box::new(cell),
        end: ending.end().time(),
    };
    Ok(Cell::start(starting))
}
