//! Event selection by time, room, track and user selection.
//!
//! A filter combines one [`TimeMode`] with set-membership predicates. The
//! predicates are plain intersections, so they can be applied in any order.

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::error::{ScheduleError, ScheduleResult};
use crate::event::{Event, Selection};
use crate::time::TimeWindow;

/// Which events are relevant relative to the reference time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimeMode {
    /// Events running at the reference time.
    #[default]
    RunningAt,
    /// Events starting at or after the reference time. With `same_day` set,
    /// only those starting on the reference time's calendar day.
    Upcoming { same_day: bool },
    /// Events starting on the reference time's calendar day.
    WholeDay,
    /// Every event.
    All,
    /// Exactly one event by id; other predicates are ignored.
    Single(String),
}

impl TimeMode {
    /// Resolves the mutually exclusive mode flags of the command line.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidConfig`] if more than one flag is set.
    pub fn from_flags(next: bool, day: bool, all: bool, one: Option<&str>) -> ScheduleResult<Self> {
        let set = [next, day, all, one.is_some()]
            .iter()
            .filter(|flag| **flag)
            .count();
        if set > 1 {
            return Err(ScheduleError::invalid_config(
                "--next, --day, --all and --one are mutually exclusive",
            ));
        }

        Ok(match (next, day, all, one) {
            (_, _, _, Some(id)) => Self::Single(id.to_string()),
            (true, _, _, _) => Self::Upcoming { same_day: false },
            (_, true, _, _) => Self::WholeDay,
            (_, _, true, _) => Self::All,
            _ => Self::RunningAt,
        })
    }

    /// Returns true if the event satisfies the time predicate.
    ///
    /// `Single` compares ids only.
    pub fn matches(&self, event: &Event, reference: DateTime<FixedOffset>) -> bool {
        match self {
            Self::RunningAt => event.is_running_at(reference),
            Self::Upcoming { same_day } => {
                event.start >= reference && (!same_day || event.starts_on_day_of(reference))
            }
            Self::WholeDay => event.starts_on_day_of(reference),
            Self::All => true,
            Self::Single(id) => event.id == *id,
        }
    }
}

/// Events chosen by a filter and the window needed to show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtered<'a> {
    /// Matching events sorted by start time, then room.
    pub events: Vec<&'a Event>,
    /// `None` when nothing matched.
    pub window: Option<TimeWindow>,
}

impl Filtered<'_> {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A complete event filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// The time predicate.
    pub mode: TimeMode,
    /// Rooms to keep; empty keeps every room.
    pub rooms: Vec<String>,
    /// Tracks to keep; empty keeps every track.
    pub tracks: Vec<String>,
    /// Keep only events in the user's selection.
    pub selected_only: bool,
}

impl EventFilter {
    /// Creates a filter with the given time mode and no other predicates.
    pub fn new(mode: TimeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Builder method to restrict rooms.
    pub fn with_rooms(mut self, rooms: Vec<String>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Builder method to restrict tracks.
    pub fn with_tracks(mut self, tracks: Vec<String>) -> Self {
        self.tracks = tracks;
        self
    }

    /// Builder method to keep only selected events.
    pub fn with_selected_only(mut self, selected_only: bool) -> Self {
        self.selected_only = selected_only;
        self
    }

    /// Applies the filter to a schedule.
    ///
    /// Every event of the input is validated first, so malformed data fails
    /// the call even if the bad event would have been filtered out.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::MalformedEvent`] if any event is invalid
    /// - [`ScheduleError::NotFound`] if a single event was requested and is
    ///   not in the schedule
    pub fn apply<'a>(
        &self,
        events: &'a [Event],
        reference: DateTime<FixedOffset>,
        selection: &Selection,
    ) -> ScheduleResult<Filtered<'a>> {
        for event in events {
            event.validate()?;
        }

        let mut matched: Vec<&Event> = if let TimeMode::Single(ref id) = self.mode {
            let event = events
                .iter()
                .find(|e| e.id == *id)
                .ok_or_else(|| ScheduleError::not_found(id))?;
            vec![event]
        } else {
            let timed = events.iter().filter(|e| self.mode.matches(e, reference));
            let roomed = filter_rooms(timed, &self.rooms);
            let tracked = filter_tracks(roomed, &self.tracks);
            if self.selected_only {
                filter_selected(tracked, selection)
            } else {
                tracked
            }
        };

        matched.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.room.cmp(&b.room))
                .then_with(|| a.id.cmp(&b.id))
        });

        debug!(
            mode = ?self.mode,
            total = events.len(),
            matched = matched.len(),
            "filtered schedule"
        );

        let window = TimeWindow::covering(matched.iter().copied());
        Ok(Filtered {
            events: matched,
            window,
        })
    }
}

/// Keeps events held in one of `rooms`; an empty list keeps everything.
pub fn filter_rooms<'a, I>(events: I, rooms: &[String]) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| rooms.is_empty() || rooms.contains(&e.room))
        .collect()
}

/// Keeps events in one of `tracks`; an empty list keeps everything.
pub fn filter_tracks<'a, I>(events: I, tracks: &[String]) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| tracks.is_empty() || tracks.contains(&e.track))
        .collect()
}

/// Keeps events whose id is selected.
pub fn filter_selected<'a, I>(events: I, selection: &Selection) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| selection.contains(&e.id))
        .collect()
}
