//! The rendering pipeline behind the `fahrplan` command.
//!
//! Loads the schedule and selection, resolves the reference time, filters
//! and renders, then colors the result.

use chrono::{DateTime, Offset, Utc};
use fahrplan_core::{Charset, EventFilter, RenderConfig, render_events, render_timetable};
use tracing::debug;

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::paint::{View, paint};
use crate::selection::load_selection;
use crate::source::Schedule;
use crate::terminal::{resolve_width, stdout_is_terminal};
use crate::when::resolve_reference;

/// Builds the render settings from flags and config; flags win.
pub fn render_config(cli: &Cli, config: &ClientConfig) -> ClientResult<RenderConfig> {
    let interval = cli.interval.unwrap_or(config.display.interval);
    let width = resolve_width(cli.width(), config.display.width);
    let charset = if cli.ascii || config.display.ascii {
        Charset::Ascii
    } else {
        Charset::Unicode
    };
    let color = !cli.nocolor && config.display.color && stdout_is_terminal();

    Ok(RenderConfig::new(interval, width)?
        .with_charset(charset)
        .with_detail(cli.events.map(Into::into).unwrap_or_default())
        .with_color(color))
}

/// Produces every output line for one invocation at time `now`.
pub fn render_at(
    cli: &Cli,
    config: &ClientConfig,
    now: DateTime<Utc>,
) -> ClientResult<Vec<String>> {
    let schedule = Schedule::load(&config.schedule_path(cli.file.as_deref()))?;
    let selection = load_selection(&config.selection_path(cli.selectfile.as_deref()))?;

    let offset = schedule.offset().unwrap_or_else(|| Utc.fix());
    let reference = resolve_reference(&cli.date, now.with_timezone(&offset))?;
    debug!(%reference, "reference time");

    let filter = EventFilter::new(cli.time_mode()?)
        .with_rooms(cli.rooms.clone())
        .with_tracks(cli.tracks.clone())
        .with_selected_only(cli.selected);
    let filtered = filter.apply(&schedule.events, reference, &selection)?;
    if let Some(window) = filtered.window {
        debug!(
            start = %window.start,
            end = %window.end,
            minutes = window.duration().num_minutes(),
            "display window"
        );
    }

    let render = render_config(cli, config)?;
    let (body, view) = if cli.events.is_some() {
        (render_events(&filtered.events, &render, &selection)?, View::Boxes)
    } else {
        (render_timetable(&filtered.events, &render, &selection)?, View::Timetable)
    };

    let mut lines = if cli.verbose {
        schedule.summary()
    } else {
        Vec::new()
    };
    lines.extend(paint(body, view, render.glyphs(), render.color()));
    Ok(lines)
}

/// Produces the output lines for the current time.
pub fn run(cli: &Cli, config: &ClientConfig) -> ClientResult<Vec<String>> {
    render_at(cli, config, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use clap::Parser;
    use fahrplan_core::ScheduleError;
    use std::path::Path;

    const SAMPLE: &str = include_str!("../fixtures/schedule.json");

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("schedule.json"), SAMPLE).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> String {
            self.dir.path().join(name).display().to_string()
        }

        fn select(&self, ids: &str) {
            std::fs::write(self.dir.path().join("selected.lst"), ids).unwrap();
        }

        fn run(&self, args: &[&str]) -> ClientResult<Vec<String>> {
            let schedule = self.path("schedule.json");
            let selection = self.path("selected.lst");
            let mut argv = vec![
                "fahrplan",
                "-f",
                schedule.as_str(),
                "--selectfile",
                selection.as_str(),
                "-n",
                "-a",
            ];
            argv.extend_from_slice(args);
            let cli = Cli::try_parse_from(argv).unwrap();
            render_at(&cli, &ClientConfig::default(), noon_utc())
        }
    }

    /// 2016-12-27 12:00 in Hamburg.
    fn noon_utc() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2016-12-27T11:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn timetable_of_running_talks() {
        let fixture = Fixture::new();
        let lines = fixture.run(&["-w", "95"]).unwrap();

        assert!(lines[0].contains("Saal 1"));
        assert!(lines[0].contains("Saal 6"));
        assert!(lines[2].starts_with("11:30|The Global Assassination Grid (8425)"));
        assert!(lines.iter().all(|l| l.chars().count() == 94));
        assert!(!lines.iter().any(|l| l.contains("Morning Show")));
    }

    #[test]
    fn reference_time_from_date_flag() {
        let fixture = Fixture::new();
        let lines = fixture.run(&["-w", "60", "-d", "28", "10", "15"]).unwrap();
        assert!(lines[0].contains("Saal G"));
        assert!(lines.iter().any(|l| l.contains("Morning Show (9001)")));
    }

    #[test]
    fn next_reaches_the_following_day() {
        let fixture = Fixture::new();
        let lines = fixture.run(&["-w", "60", "-N"]).unwrap();
        assert!(lines[0].contains("Saal G"));
        assert!(!lines[0].contains("Saal 1"));
        assert!(lines.iter().any(|l| l.contains("Morning Show (9001)")));
    }

    #[test]
    fn nothing_running() {
        let fixture = Fixture::new();
        let lines = fixture.run(&["-d", "3", "0"]).unwrap();
        assert_eq!(lines, vec!["no events match".to_string()]);
    }

    #[test]
    fn one_event_box() {
        let fixture = Fixture::new();
        let lines = fixture.run(&["-w", "60", "-O", "8425", "-e", "short"]).unwrap();

        // no subtitle in the fixture: heading, place, time, speaker
        assert_eq!(lines.len(), 4 + 2);
        assert_eq!(lines[0], format!("+{}+", "-".repeat(58)));
        assert!(lines[1].starts_with("|The Global Assassination Grid (8425)"));
        assert!(lines[3].starts_with("|Tue 2016-12-27 [11:30 <01:00> 12:30]"));
    }

    #[test]
    fn unknown_event() {
        let fixture = Fixture::new();
        let err = fixture.run(&["-O", "9999"]).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Core(ScheduleError::NotFound { ref id }) if id == "9999"
        ));
    }

    #[test]
    fn selected_only() {
        let fixture = Fixture::new();
        fixture.select("8167\n");
        let lines = fixture.run(&["-w", "95", "-S"]).unwrap();

        assert!(lines[0].contains("Saal 6"));
        assert!(!lines[0].contains("Saal 1"));
        assert!(lines[2].contains("|* Everything"));
    }

    #[test]
    fn rooms_and_tracks() {
        let fixture = Fixture::new();
        let lines = fixture
            .run(&["-w", "95", "-A", "-r", "Saal 1", "Saal G", "-t", "Security"])
            .unwrap();
        assert_eq!(lines, vec!["no events match".to_string()]);

        let lines = fixture.run(&["-w", "95", "-A", "-t", "Security"]).unwrap();
        assert!(lines[0].contains("Saal 6"));
        assert!(!lines[0].contains("Saal G"));
    }

    #[test]
    fn verbose_prints_summary_first() {
        let fixture = Fixture::new();
        let lines = fixture.run(&["-w", "95", "-v"]).unwrap();
        assert_eq!(lines[0], "[33c3] 33rd Chaos Communication Congress (1.0 Arrival)");
        assert_eq!(lines[4], "  3 events");
        assert!(lines[6].contains("Saal 1"));
    }

    #[test]
    fn missing_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let schedule = dir.path().join("absent.json");
        let cli = Cli::try_parse_from([
            "fahrplan",
            "-f",
            schedule.to_str().unwrap(),
            "-n",
        ])
        .unwrap();
        let err = render_at(&cli, &ClientConfig::default(), noon_utc()).unwrap_err();
        assert!(matches!(err, ClientError::Schedule { ref path, .. } if path == Path::new(&schedule)));
    }

    #[test]
    fn config_supplies_defaults() {
        let cli = Cli::try_parse_from(["fahrplan", "-n"]).unwrap();
        let mut config = ClientConfig::default();
        config.display.ascii = true;
        config.display.interval = 30;
        config.display.width = Some(100);

        let render = render_config(&cli, &config).unwrap();
        assert_eq!(render.charset(), Charset::Ascii);
        assert_eq!(render.interval_minutes(), 30);
        assert_eq!(render.width(), 100);
        assert!(!render.color());
    }
}
