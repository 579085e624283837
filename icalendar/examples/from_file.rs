use std::{env, fs};

pub fn main() -> anyhow::Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| "calendar.ics".into());
    let raw = fs::read_to_string(path)?;
    for event in icalendar::events(&raw)? {
        let summary = event.property("SUMMARY").map(|line| &*line.value);
        println!("line {}: {}", event.line(), summary.unwrap_or("<no summary>"));
    }
    Ok(())
}
