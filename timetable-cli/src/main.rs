use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use cli_table::{WithTitle, print_stdout};
use time::Duration;
use timetable::{
    Event,
    feed::{self, FeedOptions},
    grid::build_grid,
    layout::layout_week,
    week::{self, Week},
};
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str =
    "https://cloud.timeedit.net/lu/web/hbg2/ri6965Qy7Z4275QZ69QQ545QZ76nY8506.ics";

/// Show one week of a TimeEdit timetable
#[derive(Debug, clap::Parser)]
struct Args {
    /// ISO week to show (defaults to the current week)
    #[clap(short, long)]
    week: Option<u8>,
    /// URL of the .ics feed
    #[clap(short, long, env = "TIMETABLE_URL", default_value = DEFAULT_URL)]
    url: String,
    /// Read the feed from a file instead of fetching `url`
    #[clap(short, long)]
    file: Option<Utf8PathBuf>,
    /// Hours added to every time in the feed
    #[clap(
        long,
        env = "TIMETABLE_UTC_OFFSET",
        default_value_t = 1,
        allow_negative_numbers = true
    )]
    utc_offset: i8,
    #[clap(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    /// Weekly grid
    Table,
    /// The week's events, one per row
    List,
    /// The week's events by weekday, as JSON
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // env vars can set some args, so load them first
    dotenv::dotenv().ok();
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = run(args).await {
        tracing::error!("{e:?}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let number = args.week.unwrap_or_else(week::current_week);
    // read before fetching, the local offset is unavailable once other threads exist
    let year = week::current_year();
    // fail before fetching if the week can't be shown
    week::week_date(year, number, time::Weekday::Monday)?;
    let raw = match &args.file {
        Some(path) => tokio::fs::read(path)
            .await
            .map_err(timetable::Error::from)
            .with_context(|| format!("couldn't read `{path}`"))?,
        None => timetable::fetch(&args.url)
            .await
            .with_context(|| format!("couldn't fetch `{}`", args.url))?,
    };
    // the feed stays in memory, nothing is written to disk
    let text = String::from_utf8_lossy(&raw);
    let options = FeedOptions {
        utc_offset: Duration::hours(args.utc_offset.into()),
    };
    let events = feed::parse_feed_with(&text, options)?;
    tracing::debug!(week = number, total = events.len(), "bucketing events");
    let week = Week::bucket(events, number);

    match args.format {
        Format::Table => show_week(&week, year)?,
        Format::List => {
            let events: Vec<Event> = week.events().cloned().collect();
            print_stdout(events.with_title())?;
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&week)?),
    }
    Ok(())
}

/// Draw `week`, dating the columns in ISO year `year`.
fn show_week(week: &Week, year: i32) -> Result<()> {
    let layout = layout_week(week)?;
    let grid = build_grid(&layout, year)?;
    print_stdout(grid.to_table())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use timetable::week::Week;

    use super::{Args, DEFAULT_URL, Format, show_week};

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["timetable"]).unwrap();
        assert_eq!(args.week, None);
        assert!(args.file.is_none());
        assert!(matches!(args.format, Format::Table));
        // env may override these, only check them when it doesn't
        if std::env::var_os("TIMETABLE_URL").is_none() {
            assert_eq!(args.url, DEFAULT_URL);
        }
        if std::env::var_os("TIMETABLE_UTC_OFFSET").is_none() {
            assert_eq!(args.utc_offset, 1);
        }
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "timetable",
            "-w",
            "12",
            "--file",
            "feed.ics",
            "--utc-offset",
            "-2",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.week, Some(12));
        assert_eq!(args.file.as_deref().map(|path| path.as_str()), Some("feed.ics"));
        assert_eq!(args.utc_offset, -2);
        assert!(matches!(args.format, Format::Json));
    }

    #[test]
    fn short_file_flag() {
        let args = Args::try_parse_from(["timetable", "-f", "feed.ics"]).unwrap();
        assert_eq!(args.file.as_deref().map(|path| path.as_str()), Some("feed.ics"));
    }

    #[test]
    fn grid_is_dated_in_the_given_year() {
        let week = Week::bucket(vec![], 53);
        // 2020 has an ISO week 53, 2021 doesn't
        assert!(show_week(&week, 2020).is_ok());
        let err = show_week(&week, 2021).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<timetable::Error>(),
            Some(timetable::Error::InvalidWeek {
                year: 2021,
                week: 53
            })
        ));
    }

    #[test]
    fn week_must_be_a_number() {
        assert!(Args::try_parse_from(["timetable", "--week", "ten"]).is_err());
    }
}
