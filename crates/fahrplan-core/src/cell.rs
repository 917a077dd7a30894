//! Fitting prioritized text fields into fixed-geometry blocks.
//!
//! [`fit_fields`] is shared by the timetable cells and the individual event
//! boxes: every field is word-wrapped to the width, and when a line budget is
//! given, higher priority fields claim lines first.

use crate::config::MIN_COLUMN_WIDTH;
use crate::event::Event;
use crate::glyphs::Glyphs;
use crate::text::{cut_with_marker, pad, wrap};

/// How important a field is when space runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Normal,
    /// Always gets at least one line.
    Essential,
}

/// One piece of text to lay out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub text: String,
    pub priority: Priority,
}

impl Field {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            priority,
        }
    }
}

/// Wraps fields to `width` and, with a line budget, keeps as much as fits.
///
/// Lines are handed out in priority order (ties go to the earlier field).
/// Output keeps the fields' original order. When any wrapped line was left
/// out, the last emitted line carries the ellipsis marker. The result may be
/// shorter than the budget.
pub fn fit_fields(
    fields: &[Field],
    width: usize,
    max_lines: Option<usize>,
    glyphs: &Glyphs,
) -> Vec<String> {
    let wrapped: Vec<Vec<String>> = fields
        .iter()
        .map(|f| wrap(&f.text, width, glyphs.ellipsis))
        .collect();

    let Some(budget) = max_lines else {
        return wrapped.into_iter().flatten().collect();
    };

    let mut order: Vec<usize> = (0..fields.len()).collect();
    order.sort_by(|a, b| fields[*b].priority.cmp(&fields[*a].priority));

    let mut granted = vec![0; fields.len()];
    let mut remaining = budget;
    for idx in order {
        let take = wrapped[idx].len().min(remaining);
        granted[idx] = take;
        remaining -= take;
    }

    let omitted = wrapped
        .iter()
        .zip(&granted)
        .any(|(field_lines, &take)| take < field_lines.len());

    let mut lines: Vec<String> = wrapped
        .into_iter()
        .zip(granted)
        .flat_map(|(field_lines, take)| field_lines.into_iter().take(take))
        .collect();
    if omitted {
        if let Some(last) = lines.last_mut() {
            *last = cut_with_marker(last, width, glyphs.ellipsis);
        }
    }
    lines
}

/// The fields a timetable cell shows, most important first.
pub fn cell_fields(event: &Event, selected: bool, glyphs: &Glyphs) -> Vec<Field> {
    let heading = if selected {
        format!("{} {} ({})", glyphs.selected, event.title, event.id)
    } else {
        format!("{} ({})", event.title, event.id)
    };

    vec![
        Field::new(heading, Priority::Essential),
        Field::new(event.track.clone(), Priority::Normal),
        Field::new(event.speaker_line(), Priority::Low),
    ]
}

/// Formats an event as a timetable cell block.
///
/// The block has exactly `rows` lines (at least one), each exactly `width`
/// columns wide (at least [`MIN_COLUMN_WIDTH`]). Abstract and description are
/// never shown here.
pub fn format_cell(
    event: &Event,
    width: usize,
    rows: usize,
    selected: bool,
    glyphs: &Glyphs,
) -> Vec<String> {
    let width = width.max(MIN_COLUMN_WIDTH);
    let rows = rows.max(1);

    let fields = cell_fields(event, selected, glyphs);
    let mut block: Vec<String> = fit_fields(&fields, width, Some(rows), glyphs)
        .iter()
        .map(|line| pad(line, width))
        .collect();
    block.resize(rows, " ".repeat(width));
    block
}
