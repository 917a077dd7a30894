//! Fahrplan `schedule.json` loading.
//!
//! The file nests events as `schedule.conference.days[].rooms{name: [event]}`.
//! Events are flattened into [`Event`]s; empty strings for optional fields
//! become `None`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use fahrplan_core::Event;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Deserialize)]
struct RawDocument {
    schedule: RawSchedule,
}

#[derive(Debug, Deserialize)]
struct RawSchedule {
    #[serde(default)]
    version: String,
    conference: RawConference,
}

#[derive(Debug, Deserialize)]
struct RawConference {
    #[serde(default)]
    title: String,
    #[serde(default)]
    acronym: String,
    #[serde(default)]
    days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    date: NaiveDate,
    #[serde(default)]
    rooms: BTreeMap<String, Vec<RawEvent>>,
}

/// Event ids are numbers in most exports and strings in some.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPerson {
    public_name: String,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: RawId,
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    track: Option<String>,
    #[serde(default)]
    room: Option<String>,
    #[serde(default)]
    language: Option<String>,
    date: DateTime<FixedOffset>,
    duration: String,
    #[serde(default)]
    persons: Vec<RawPerson>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// A loaded conference schedule.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub version: String,
    pub title: String,
    pub acronym: String,
    pub days: Vec<NaiveDate>,
    /// All events, sorted by start.
    pub events: Vec<Event>,
}

impl Schedule {
    /// Reads and parses a schedule file.
    pub fn load(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::schedule(path, e))?;
        let schedule = Self::from_json(&content).map_err(|e| ClientError::schedule(path, e))?;
        debug!(
            path = %path.display(),
            events = schedule.events.len(),
            "loaded schedule"
        );
        Ok(schedule)
    }

    /// Parses Fahrplan JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let document: RawDocument = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let conference = document.schedule.conference;

        let mut days = Vec::with_capacity(conference.days.len());
        let mut events = Vec::new();
        for day in conference.days {
            days.push(day.date);
            for (room, raw_events) in day.rooms {
                for raw in raw_events {
                    events.push(convert(raw, &room)?);
                }
            }
        }
        events.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.room.cmp(&b.room))
                .then_with(|| a.id.cmp(&b.id))
        });
        days.sort();

        Ok(Self {
            version: document.schedule.version,
            title: conference.title,
            acronym: conference.acronym,
            days,
            events,
        })
    }

    /// Distinct room names, sorted.
    pub fn rooms(&self) -> BTreeSet<&str> {
        self.events.iter().map(|e| e.room.as_str()).collect()
    }

    /// Distinct non-empty track names, sorted.
    pub fn tracks(&self) -> BTreeSet<&str> {
        self.events
            .iter()
            .map(|e| e.track.as_str())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Distinct speaker names, sorted.
    pub fn speakers(&self) -> BTreeSet<&str> {
        self.events
            .iter()
            .flat_map(|e| e.speakers.iter().map(String::as_str))
            .collect()
    }

    /// The offset the conference's times are given in.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.events.first().map(|e| *e.start.offset())
    }

    /// Overview lines printed with `--verbose`.
    pub fn summary(&self) -> Vec<String> {
        let join = |items: BTreeSet<&str>| items.into_iter().collect::<Vec<_>>().join(", ");
        let days = self
            .days
            .iter()
            .map(|d| d.format("%a %Y-%m-%d").to_string())
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            format!("[{}] {} ({})", self.acronym, self.title, self.version),
            format!("days: {}", days),
            format!("rooms: {}", join(self.rooms())),
            format!("tracks: {}", join(self.tracks())),
            format!("{:3} events", self.events.len()),
            format!("{:3} speakers", self.speakers().len()),
        ]
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses an `HH:MM` duration.
fn parse_duration(value: &str) -> Option<Duration> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: i64 = hours.trim().parse().ok()?;
    let minutes: i64 = minutes.trim().parse().ok()?;
    if minutes >= 60 || hours < 0 || minutes < 0 {
        return None;
    }
    Some(Duration::minutes(hours * 60 + minutes))
}

fn convert(raw: RawEvent, day_room: &str) -> Result<Event, String> {
    let id = raw.id.into_string();
    let duration = parse_duration(&raw.duration)
        .ok_or_else(|| format!("event {}: bad duration {:?}", id, raw.duration))?;
    let room = non_empty(raw.room).unwrap_or_else(|| day_room.to_string());

    let mut event = Event::new(id, raw.title, room, raw.date, raw.date + duration);
    event.subtitle = non_empty(raw.subtitle);
    event.track = non_empty(raw.track).unwrap_or_default();
    event.language = non_empty(raw.language).unwrap_or_default();
    event.speakers = raw
        .persons
        .into_iter()
        .map(|p| p.public_name)
        .filter(|name| !name.trim().is_empty())
        .collect();
    event.abstract_text = non_empty(raw.abstract_text);
    event.description = non_empty(raw.description);
    Ok(event)
}
