//! Weekly timetable from an iCalendar feed.
//!
//! The feed is parsed into [`Event`]s ([`feed`]), the events of one ISO week are split by
//! weekday ([`week`]), each day is placed on an hour grid ([`layout`]) and the grid is turned
//! into a table for the terminal ([`grid`]).

pub mod data;
mod error;
pub mod feed;
mod fetch;
pub mod grid;
pub mod layout;
pub mod week;

pub use data::Event;
pub use error::{Error, Result};
pub use fetch::fetch;
