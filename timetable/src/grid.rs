//! Turns a week layout into the text drawn in the terminal
//!
//! No layout decisions are made here, each [`Cell`] maps to a fixed piece of text.

use std::iter;

use cli_table::{Cell as _, Color, Style, Table, TableStruct};
use time::Time;

use crate::{
    Result,
    layout::{Cell, FIRST_HOUR, LAST_HOUR, WeekLayout},
    week::week_date,
};

/// `light_salmon1` in the 256-colour palette
const CELL_COLOR: Color = Color::Ansi256(216);
const HEADER_COLOR: Color = Color::Cyan;

/// One weekday of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    header: String,
    cells: Vec<String>,
}

impl Column {
    /// Weekday and date, e.g. `Monday 04/03`
    pub fn header(&self) -> &str {
        &self.header
    }

    /// One entry per hour
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Rows are hours, columns are the time labels followed by Monday to Friday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    week: u8,
    time_labels: Vec<String>,
    columns: Vec<Column>,
}

/// Format `layout`, dating the columns in `year`.
pub fn build_grid(layout: &WeekLayout, year: i32) -> Result<WeekGrid> {
    let columns = layout
        .days()
        .iter()
        .map(|day| -> Result<Column> {
            let date = week_date(year, layout.number(), day.weekday())?;
            Ok(Column {
                header: format!(
                    "{} {:02}/{:02}",
                    day.weekday(),
                    date.day(),
                    u8::from(date.month())
                ),
                cells: day.cells().iter().map(cell_text).collect(),
            })
        })
        .collect::<Result<_>>()?;
    Ok(WeekGrid {
        week: layout.number(),
        time_labels: (FIRST_HOUR..=LAST_HOUR)
            .map(|hour| format!("  {hour:02}\n\n\n\n"))
            .collect(),
        columns,
    })
}

impl WeekGrid {
    pub fn week(&self) -> u8 {
        self.week
    }

    pub fn time_labels(&self) -> &[String] {
        &self.time_labels
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Build the table to draw.
    pub fn to_table(&self) -> TableStruct {
        let title: Vec<_> = iter::once(format!("Week {}", self.week))
            .chain(self.columns.iter().map(|column| column.header.clone()))
            .map(|header| {
                header
                    .cell()
                    .bold(true)
                    .foreground_color(Some(HEADER_COLOR))
            })
            .collect();
        let rows: Vec<Vec<_>> = self
            .time_labels
            .iter()
            .enumerate()
            .map(|(row, label)| {
                iter::once(label)
                    .chain(self.columns.iter().map(|column| &column.cells[row]))
                    .map(|text| {
                        text.as_str()
                            .cell()
                            .bold(true)
                            .foreground_color(Some(CELL_COLOR))
                    })
                    .collect()
            })
            .collect();
        rows.table().title(title)
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => " ".into(),
        Cell::Start { time, course } => format!("--{}--------\n    {course}", hour_minute(*time)),
        Cell::End { time } => end_marker(*time),
        Cell::Continuation => "  ".into(),
        Cell::Closing { cell, end } => format!("{}\n\n\n{}", cell_text(cell), end_marker(*end)),
    }
}

fn end_marker(time: Time) -> String {
    format!("--------{}--", hour_minute(time))
}

fn hour_minute(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
