//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use fahrplan_core::{Detail, ScheduleResult, TimeMode};

/// fahrplan - conference schedule in the terminal
#[derive(Debug, Parser)]
#[command(name = "fahrplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "FAHRPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print an overview of the schedule first
    #[arg(long, short)]
    pub verbose: bool,

    // --- Input files ---
    /// Schedule file (Fahrplan JSON)
    #[arg(long, short, env = "FAHRPLAN_FILE")]
    pub file: Option<PathBuf>,

    /// File with one selected event id per line
    #[arg(long)]
    pub selectfile: Option<PathBuf>,

    // --- Time ---
    /// Time to look at instead of now: [[[[[year] month] day] hour] minute]
    #[arg(long, short, alias = "time", num_args = 1..=5, value_name = "N")]
    pub date: Vec<u32>,

    /// Show upcoming events instead of running ones
    #[arg(long, short = 'N', group = "mode")]
    pub next: bool,

    /// Show the whole day
    #[arg(long, short = 'D', group = "mode")]
    pub day: bool,

    /// Show all events regardless of time (other filters still apply)
    #[arg(long, short = 'A', group = "mode")]
    pub all: bool,

    /// Show only this event, ignoring every other filter
    #[arg(long, short = 'O', alias = "event", group = "mode", value_name = "ID")]
    pub one: Option<String>,

    // --- Filters ---
    /// Rooms to show
    #[arg(long, short, num_args = 1.., value_name = "ROOM")]
    pub rooms: Vec<String>,

    /// Tracks to show
    #[arg(long, short, num_args = 1.., value_name = "TRACK")]
    pub tracks: Vec<String>,

    /// Show only selected events
    #[arg(long, short = 'S')]
    pub selected: bool,

    // --- Display ---
    /// Print events one by one instead of a timetable
    #[arg(long, short, value_enum, value_name = "DETAIL")]
    pub events: Option<EventsArg>,

    /// Minutes per timetable row
    #[arg(long, short, value_name = "MIN", value_parser = clap::value_parser!(u32).range(1..))]
    pub interval: Option<u32>,

    /// Output width in columns (default: terminal width)
    #[arg(long, short, value_name = "COLS", value_parser = clap::value_parser!(u64).range(1..))]
    pub width: Option<u64>,

    /// Draw with ASCII instead of Unicode
    #[arg(long, short)]
    pub ascii: bool,

    /// Disable colors
    #[arg(long, short)]
    pub nocolor: bool,
}

/// Detail level for `--events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventsArg {
    Short,
    Full,
}

impl From<EventsArg> for Detail {
    fn from(arg: EventsArg) -> Self {
        match arg {
            EventsArg::Short => Detail::Short,
            EventsArg::Full => Detail::Full,
        }
    }
}

impl Cli {
    /// The time mode selected by the mode flags.
    pub fn time_mode(&self) -> ScheduleResult<TimeMode> {
        TimeMode::from_flags(self.next, self.day, self.all, self.one.as_deref())
    }

    /// The width flag as a column count.
    pub fn width(&self) -> Option<usize> {
        self.width.and_then(|w| usize::try_from(w).ok())
    }
}
