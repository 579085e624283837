//! Just enough iCalendar (RFC 5545) to read events out of a feed.
//!
//! Text is unfolded into content lines (`NAME;PARAM=VALUE:value`) and the `VEVENT` components
//! are collected with their properties. Property values are returned raw, interpreting them is
//! left to the caller.

mod component;
mod error;
mod lexer;
mod line;
mod line_iter;

pub use component::Component;
pub use error::{ParserError, ParserErrorKind};
pub use line::{Line, Name, Param};

use lexer::Lexer;

/// Every `VEVENT` in `input`, in document order.
///
/// Events are found at any depth (normally inside `VCALENDAR`), everything outside them is only
/// checked to be well-formed content lines.
pub fn events(input: &str) -> Result<Vec<Component<'_>>, ParserError> {
    let mut lexer = Lexer::new(input);
    let mut events = vec![];
    while let Some(line) = lexer.take_next()? {
        if line.is_begin("VEVENT") {
            events.push(Component::parse(line, &mut lexer)?);
        }
    }
    tracing::debug!(count = events.len(), "found events");
    Ok(events)
}
