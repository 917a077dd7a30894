//! Event types for conference schedules.
//!
//! This module provides the core types for representing a schedule:
//! - [`Event`]: A single talk bound to one room and one track
//! - [`Selection`]: The set of event ids a user marked as interesting

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// A normalized conference event.
///
/// This is the canonical representation of a talk after loading a schedule.
/// Timestamps carry the conference's UTC offset so that wall-clock labels are
/// rendered in local conference time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique, stable identifier.
    pub id: String,
    /// The talk title.
    pub title: String,
    /// Optional subtitle.
    pub subtitle: Option<String>,
    /// Track (category) name.
    pub track: String,
    /// Room name, used as the timetable column key.
    pub room: String,
    /// Language code the talk is given in.
    pub language: String,
    /// When the event starts.
    pub start: DateTime<FixedOffset>,
    /// When the event ends (exclusive).
    pub end: DateTime<FixedOffset>,
    /// Speaker names in schedule order.
    pub speakers: Vec<String>,
    /// Short abstract.
    pub abstract_text: Option<String>,
    /// Long description.
    pub description: Option<String>,
}

impl Event {
    /// Creates a new Event with required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        room: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            track: String::new(),
            room: room.into(),
            language: String::new(),
            start,
            end,
            speakers: Vec::new(),
            abstract_text: None,
            description: None,
        }
    }

    /// Checks the invariants the layout relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::MalformedEvent`] when the event does not end
    /// after it starts or has no room.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.end <= self.start {
            return Err(ScheduleError::malformed(
                &self.id,
                "end is not after start",
            ));
        }
        if self.room.trim().is_empty() {
            return Err(ScheduleError::malformed(&self.id, "missing room"));
        }
        Ok(())
    }

    /// Returns the duration of the event.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the duration of the event in minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Checks if the event is running at the given time.
    pub fn is_running_at(&self, t: DateTime<FixedOffset>) -> bool {
        self.start <= t && t < self.end
    }

    /// Checks if the event starts on the same calendar day as `t`,
    /// using `t`'s offset to decide the day.
    pub fn starts_on_day_of(&self, t: DateTime<FixedOffset>) -> bool {
        self.start.with_timezone(t.offset()).date_naive() == t.date_naive()
    }

    /// Speakers joined for display.
    pub fn speaker_line(&self) -> String {
        self.speakers.join(", ")
    }

    /// Builder method to set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Builder method to set the track.
    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = track.into();
        self
    }

    /// Builder method to set the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method to add a speaker.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speakers.push(speaker.into());
        self
    }

    /// Builder method to set the abstract.
    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Event ids the user selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the event id is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Marks an id as selected.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
