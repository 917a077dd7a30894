//! Time helpers for schedule layout.
//!
//! This module provides [`TimeWindow`] for the span a set of events needs on
//! screen, and [`truncate_to_interval`] for snapping timestamps to row
//! boundaries.

use chrono::{DateTime, Duration, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// The time range needed to display a set of events.
///
/// Represents a half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<FixedOffset>,
    /// End of the window (exclusive).
    pub end: DateTime<FixedOffset>,
}

impl TimeWindow {
    /// The smallest window covering every event, from the earliest start to
    /// the latest end. Returns `None` for an empty set.
    ///
    /// An event that ends before it starts still widens the window by both
    /// of its timestamps, so `start <= end` always holds.
    pub fn covering<'a, I>(events: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events.into_iter().fold(None, |window, event| {
            let first = event.start.min(event.end);
            let last = event.start.max(event.end);
            Some(match window {
                None => Self {
                    start: first,
                    end: last,
                },
                Some(w) => Self {
                    start: w.start.min(first),
                    end: w.end.max(last),
                },
            })
        })
    }

    /// Returns the duration of this time window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Floors a timestamp to the previous interval boundary.
///
/// Boundaries are multiples of `interval_minutes` counted from local midnight
/// in the timestamp's own offset; seconds are dropped.
pub fn truncate_to_interval(t: DateTime<FixedOffset>, interval_minutes: u32) -> DateTime<FixedOffset> {
    let step = i64::from(interval_minutes.max(1));
    let minute_of_day = i64::from(t.hour() * 60 + t.minute());
    let floored = minute_of_day - minute_of_day % step;
    let offset = minute_of_day - floored;
    t - Duration::minutes(offset)
        - Duration::seconds(i64::from(t.second()))
        - Duration::nanoseconds(i64::from(t.nanosecond()))
}
