//! Interval grid: the rows and columns of a timetable.
//!
//! Rows are fixed-size time intervals covering the events' window, columns
//! are the distinct rooms in alphabetical order.

use std::collections::BTreeSet;
use std::ops::Range;

use chrono::{DateTime, Duration, FixedOffset, Timelike};
use tracing::debug;

use crate::event::Event;
use crate::time::{TimeWindow, truncate_to_interval};

/// Row boundaries and room columns for one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalGrid {
    interval_minutes: u32,
    rows: Vec<DateTime<FixedOffset>>,
    rooms: Vec<String>,
}

impl IntervalGrid {
    /// Builds the grid for a set of events.
    ///
    /// The first row starts at the earliest event start floored to the
    /// interval; rows continue while they begin before the latest end, so a
    /// partial final interval still gets a row. No events yield an empty
    /// grid.
    pub fn build(events: &[&Event], interval_minutes: u32) -> Self {
        let interval_minutes = interval_minutes.max(1);
        let Some(window) = TimeWindow::covering(events.iter().copied()) else {
            return Self {
                interval_minutes,
                rows: Vec::new(),
                rooms: Vec::new(),
            };
        };

        let step = Duration::minutes(i64::from(interval_minutes));
        let mut rows = Vec::new();
        let mut boundary = truncate_to_interval(window.start, interval_minutes);
        while boundary < window.end {
            rows.push(boundary);
            boundary += step;
        }

        let rooms: Vec<String> = events
            .iter()
            .map(|e| e.room.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        debug!(
            rows = rows.len(),
            rooms = rooms.len(),
            interval_minutes,
            "built interval grid"
        );

        Self {
            interval_minutes,
            rows,
            rooms,
        }
    }

    /// Row start times, ascending.
    pub fn rows(&self) -> &[DateTime<FixedOffset>] {
        &self.rows
    }

    /// Room names in column order.
    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// Returns true if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index of a room.
    pub fn column_of(&self, room: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r == room)
    }

    /// The rows an event overlaps, as a half-open range of row indices.
    ///
    /// The range is never empty for an event inside the grid's window.
    pub fn span(&self, event: &Event) -> Range<usize> {
        let Some(&origin) = self.rows.first() else {
            return 0..0;
        };
        let step = i64::from(self.interval_minutes) * 60;
        let last_row = self.rows.len() - 1;

        let from_origin = (event.start - origin).num_seconds().max(0);
        let first = usize::try_from(from_origin / step).unwrap_or(0).min(last_row);

        let until_end = (event.end - origin).num_seconds().max(0);
        let end = usize::try_from((until_end + step - 1) / step)
            .unwrap_or(0)
            .clamp(first + 1, self.rows.len());

        first..end
    }

    /// Gutter label for a row: `HH:MM` on the hour, `:MM` on half hours (and
    /// quarter hours when the interval is finer than 15 minutes), otherwise
    /// nothing.
    pub fn label(&self, row: usize) -> Option<String> {
        let boundary = self.rows.get(row)?;
        let minute = boundary.minute();
        let marks: &[u32] = if self.interval_minutes < 15 {
            &[15, 30, 45]
        } else {
            &[30]
        };

        if minute == 0 {
            Some(boundary.format("%H:%M").to_string())
        } else if marks.contains(&minute) {
            Some(boundary.format(":%M").to_string())
        } else {
            None
        }
    }
}
