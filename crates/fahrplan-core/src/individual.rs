//! Individual view: one bordered box per event.

use crate::cell::{Field, Priority, fit_fields};
use crate::config::{Detail, MIN_COLUMN_WIDTH, RenderConfig};
use crate::error::ScheduleResult;
use crate::event::{Event, Selection};
use crate::glyphs::Glyphs;
use crate::text::{pad, strip_html, wrap};
use crate::timetable::NO_EVENTS;

/// Formats a duration in minutes as `HH:MM`.
fn hours_minutes(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// The header fields every box shows, in display order.
fn header_fields(event: &Event, selected: bool, glyphs: &Glyphs) -> Vec<Field> {
    let heading = if selected {
        format!("{} {} ({})", glyphs.selected, event.title, event.id)
    } else {
        format!("{} ({})", event.title, event.id)
    };

    let subtitle = event
        .subtitle
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("--- {}", s))
        .unwrap_or_default();

    let place = [
        event.track.as_str(),
        event.room.as_str(),
        event.language.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" // ");

    let when = format!(
        "{} [{} <{}> {}]",
        event.start.format("%a %Y-%m-%d"),
        event.start.format("%H:%M"),
        hours_minutes(event.duration_minutes()),
        event.end.format("%H:%M"),
    );

    vec![
        Field::new(heading, Priority::Essential),
        Field::new(subtitle, Priority::Normal),
        Field::new(place, Priority::Normal),
        Field::new(when, Priority::Essential),
        Field::new(event.speaker_line(), Priority::Low),
    ]
}

/// Wraps a long text section, one source line at a time.
///
/// Tags are stripped and blank source lines dropped. Returns nothing for a
/// missing or blank text.
fn section(label: &str, text: Option<&str>, width: usize, glyphs: &Glyphs) -> Vec<String> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Vec::new();
    };

    let text = format!("{} {}", label, strip_html(text));
    let mut lines = vec![String::new()];
    for source_line in text.lines() {
        lines.extend(wrap(source_line, width, glyphs.ellipsis));
    }
    lines
}

/// Renders one event as a box of the configured width.
///
/// Short detail shows the header fields; full detail adds the abstract and
/// description when present.
///
/// # Errors
///
/// Returns [`ScheduleError::MalformedEvent`](crate::error::ScheduleError::MalformedEvent)
/// for an event that does not end after it starts or has no room.
pub fn render_event(
    event: &Event,
    config: &RenderConfig,
    selected: bool,
) -> ScheduleResult<Vec<String>> {
    event.validate()?;

    let glyphs = config.glyphs();
    let inner = config.width().saturating_sub(2).max(MIN_COLUMN_WIDTH);

    let mut content = fit_fields(&header_fields(event, selected, glyphs), inner, None, glyphs);
    if config.detail() == Detail::Full {
        content.extend(section(
            "ABSTRACT",
            event.abstract_text.as_deref(),
            inner,
            glyphs,
        ));
        content.extend(section(
            "DESCRIPTION",
            event.description.as_deref(),
            inner,
            glyphs,
        ));
    }

    let edge = glyphs.rule(inner);
    let mut lines = Vec::with_capacity(content.len() + 2);
    lines.push(format!("{}{}{}", glyphs.top_left, edge, glyphs.top_right));
    for line in content {
        lines.push(format!(
            "{}{}{}",
            glyphs.vertical,
            pad(&line, inner),
            glyphs.vertical
        ));
    }
    lines.push(format!(
        "{}{}{}",
        glyphs.bottom_left, edge, glyphs.bottom_right
    ));
    Ok(lines)
}

/// Renders each event as its own box, one after another.
///
/// An empty event set renders the single line [`NO_EVENTS`].
///
/// # Errors
///
/// Fails on the first malformed event; no partial output is returned.
pub fn render_events(
    events: &[&Event],
    config: &RenderConfig,
    selection: &Selection,
) -> ScheduleResult<Vec<String>> {
    if events.is_empty() {
        return Ok(vec![NO_EVENTS.to_string()]);
    }

    let mut lines = Vec::new();
    for event in events {
        lines.extend(render_event(event, config, selection.contains(&event.id))?);
    }
    Ok(lines)
}
