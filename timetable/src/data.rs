use serde::Serialize;
use time::{PrimitiveDateTime, Time};

mod interval;
pub use interval::{EventInterval, EventIntervalError};

/// One timetable entry, e.g. a lecture.
///
/// Built once from the feed and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, cli_table::Table)]
pub struct Event {
    #[table(title = "Course")]
    course: String,
    #[table(title = "Time")]
    interval: EventInterval,
    #[table(title = "Summary")]
    summary: String,
}

impl Event {
    pub fn new(course: impl Into<String>, summary: impl Into<String>, interval: EventInterval) -> Self {
        Self {
            course: course.into(),
            summary: summary.into(),
            interval,
        }
    }

    /// Short course code
    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn interval(&self) -> EventInterval {
        self.interval
    }

    pub fn start(&self) -> PrimitiveDateTime {
        self.interval.start()
    }

    pub fn end(&self) -> PrimitiveDateTime {
        self.interval.end()
    }

    /// Whether `hour` is between the start and end hours (inclusive).
    ///
    /// Only hours are compared, so an event ending at 10:05 is still active at 10.
    pub fn is_active_at(&self, hour: u8) -> bool {
        (self.start().hour()..=self.end().hour()).contains(&hour)
    }

    /// Whether the event starts exactly on the hour `hour`.
    pub fn starts_at(&self, hour: u8) -> bool {
        is_top_of(self.start().time(), hour)
    }

    /// Whether the event ends exactly on the hour `hour`.
    pub fn ends_at(&self, hour: u8) -> bool {
        is_top_of(self.end().time(), hour)
    }
}

// seconds are ignored, feed times have minute precision
fn is_top_of(time: Time, hour: u8) -> bool {
    time.hour() == hour && time.minute() == 0
}
