//! Timetable rendering: rooms side by side across a time axis.
//!
//! Each interval row is as tall as the tallest event block starting in it.
//! Cells below an event's first row, and the separators between them, are
//! drawn with the continuation glyph so a talk reads as one merged block.
//!
//! ```text
//!      |   Saal 1   |   Saal 6   |
//! -----+------------+------------+
//! 11:30|Talk (1)    |Other (2)   |
//!      |Track       |Track       |
//! -----+~~~~~~~~~~~~+~~~~~~~~~~~~+
//!      |~~~~~~~~~~~~|~~~~~~~~~~~~|
//! -----+------------+------------+
//! ```

use tracing::{trace, warn};

use crate::cell::format_cell;
use crate::config::{MIN_COLUMN_WIDTH, RenderConfig};
use crate::error::ScheduleResult;
use crate::event::{Event, Selection};
use crate::glyphs::Glyphs;
use crate::grid::IntervalGrid;
use crate::text::{center, ellipsis, right};

/// Columns reserved for time labels, not counting the border after them.
pub const GUTTER_WIDTH: usize = 5;

/// Output when no event matched the filters.
pub const NO_EVENTS: &str = "no events match";

/// What a grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCell<'a> {
    /// No event in this room at this time.
    Empty,
    /// The event from a previous row is still running.
    Continues,
    /// An event begins in this row.
    Starts(&'a Event),
}

/// Width of each room column for a target total width.
///
/// Every column plus its right border fits in what is left after the gutter;
/// below [`MIN_COLUMN_WIDTH`] the minimum is used and the table overflows.
pub fn column_width(rooms: usize, target: usize) -> usize {
    if rooms == 0 {
        return MIN_COLUMN_WIDTH;
    }
    let available = target.saturating_sub(GUTTER_WIDTH + 1);
    (available / rooms).saturating_sub(1).max(MIN_COLUMN_WIDTH)
}

/// A laid-out timetable, ready to render.
#[derive(Debug, Clone)]
pub struct Timetable<'a> {
    grid: IntervalGrid,
    /// `cells[row][column]`
    cells: Vec<Vec<LayoutCell<'a>>>,
    column_width: usize,
}

impl<'a> Timetable<'a> {
    /// Assigns events to grid cells.
    ///
    /// Rooms are expected to hold one event at a time. If two events in one
    /// room overlap, the later one is skipped wherever a cell is taken.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::MalformedEvent`](crate::error::ScheduleError::MalformedEvent) if an
    /// event does not end after it starts or has no room.
    pub fn layout(events: &[&'a Event], config: &RenderConfig) -> ScheduleResult<Self> {
        for event in events {
            event.validate()?;
        }

        let grid = IntervalGrid::build(events, config.interval_minutes());
        let width = column_width(grid.rooms().len(), config.width());
        let mut cells = vec![vec![LayoutCell::Empty; grid.rooms().len()]; grid.rows().len()];

        for &event in events {
            let Some(column) = grid.column_of(&event.room) else {
                continue;
            };
            let span = grid.span(event);
            if span
                .clone()
                .any(|row| cells[row][column] != LayoutCell::Empty)
            {
                warn!(id = %event.id, room = %event.room, "overlapping event skipped");
                continue;
            }

            cells[span.start][column] = LayoutCell::Starts(event);
            for row in span.skip(1) {
                cells[row][column] = LayoutCell::Continues;
            }
        }

        let table = Self {
            grid,
            cells,
            column_width: width,
        };
        if table.total_width() > config.width() {
            warn!(
                needed = table.total_width(),
                target = config.width(),
                "columns at minimum width, table overflows"
            );
        }
        Ok(table)
    }

    pub fn grid(&self) -> &IntervalGrid {
        &self.grid
    }

    pub fn column_width(&self) -> usize {
        self.column_width
    }

    /// The cell at a row and column.
    pub fn cell(&self, row: usize, column: usize) -> Option<LayoutCell<'a>> {
        self.cells.get(row)?.get(column).copied()
    }

    /// Total display width of every rendered line.
    pub fn total_width(&self) -> usize {
        GUTTER_WIDTH + 1 + self.grid.rooms().len() * (self.column_width + 1)
    }

    /// Draws the table.
    pub fn render(&self, glyphs: &Glyphs, selection: &Selection) -> Vec<String> {
        if self.grid.is_empty() {
            return vec![NO_EVENTS.to_string()];
        }

        let mut lines = vec![self.header(glyphs), self.separator(None, glyphs)];

        for row in 0..self.grid.rows().len() {
            let blocks: Vec<Vec<String>> = (0..self.grid.rooms().len())
                .map(|column| self.block(row, column, glyphs, selection))
                .collect();
            let height = blocks.iter().map(Vec::len).max().unwrap_or(1);
            trace!(row, height, "rendering interval row");

            for i in 0..height {
                let label = if i == 0 {
                    self.grid.label(row).unwrap_or_default()
                } else {
                    String::new()
                };
                let mut line = right(&label, GUTTER_WIDTH);
                line.push(glyphs.vertical);
                for (column, block) in blocks.iter().enumerate() {
                    match block.get(i) {
                        Some(text) => line.push_str(text),
                        None => line.push_str(&self.filler(row, column, glyphs)),
                    }
                    line.push(glyphs.vertical);
                }
                lines.push(line);
            }

            lines.push(self.separator(Some(row), glyphs));
        }

        lines
    }

    fn header(&self, glyphs: &Glyphs) -> String {
        let mut line = " ".repeat(GUTTER_WIDTH);
        line.push(glyphs.vertical);
        for room in self.grid.rooms() {
            line.push_str(&center(
                &ellipsis(room, self.column_width, glyphs.ellipsis),
                self.column_width,
            ));
            line.push(glyphs.vertical);
        }
        line
    }

    /// The rule under the header (`None`) or under an interval row.
    ///
    /// A column whose event runs on into the next row gets the continuation
    /// glyph instead of a rule.
    fn separator(&self, after_row: Option<usize>, glyphs: &Glyphs) -> String {
        let mut line = glyphs.rule(GUTTER_WIDTH);
        line.push(glyphs.cross);
        for column in 0..self.grid.rooms().len() {
            let merged = after_row
                .and_then(|row| self.cell(row + 1, column))
                .is_some_and(|cell| cell == LayoutCell::Continues);
            if merged {
                line.push_str(&glyphs.continued(self.column_width));
            } else {
                line.push_str(&glyphs.rule(self.column_width));
            }
            line.push(glyphs.cross);
        }
        line
    }

    /// The lines a cell contributes before padding to the row height.
    fn block(
        &self,
        row: usize,
        column: usize,
        glyphs: &Glyphs,
        selection: &Selection,
    ) -> Vec<String> {
        match self.cells[row][column] {
            LayoutCell::Starts(event) => {
                let rows = self.grid.span(event).len();
                format_cell(
                    event,
                    self.column_width,
                    rows,
                    selection.contains(&event.id),
                    glyphs,
                )
            }
            LayoutCell::Continues | LayoutCell::Empty => vec![self.filler(row, column, glyphs)],
        }
    }

    /// Padding for lines below a cell's own content.
    fn filler(&self, row: usize, column: usize, glyphs: &Glyphs) -> String {
        match self.cells[row][column] {
            LayoutCell::Continues => glyphs.continued(self.column_width),
            LayoutCell::Starts(_) | LayoutCell::Empty => " ".repeat(self.column_width),
        }
    }
}

/// Lays out and draws filtered events as a timetable.
///
/// An empty event set renders the single line [`NO_EVENTS`].
///
/// # Errors
///
/// Fails like [`Timetable::layout`] on a malformed event; nothing is drawn.
pub fn render_timetable(
    events: &[&Event],
    config: &RenderConfig,
    selection: &Selection,
) -> ScheduleResult<Vec<String>> {
    Ok(Timetable::layout(events, config)?.render(config.glyphs(), selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::glyphs::Charset;
    use crate::text::display_width;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn cet(h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2016, 12, 27, h, min, 0)
            .unwrap()
    }

    fn congress() -> Vec<Event> {
        vec![
            Event::new(
                "8425",
                "The Global Assassination Grid",
                "Saal 1",
                cet(11, 30),
                cet(12, 30),
            )
            .with_track("Ethics, Society & Politics")
            .with_speaker("Cian Westmoreland"),
            Event::new(
                "8167",
                "Everything you always wanted to know about Certificate Transparency",
                "Saal 6",
                cet(11, 30),
                cet(12, 30),
            )
            .with_track("Security")
            .with_speaker("Martin Schmiedecker"),
        ]
    }

    fn config(width: usize, charset: Charset) -> RenderConfig {
        RenderConfig::new(15, width).unwrap().with_charset(charset)
    }

    fn refs(events: &[Event]) -> Vec<&Event> {
        events.iter().collect()
    }

    fn assert_rectangular(lines: &[String], glyphs: &Glyphs) {
        let width = display_width(&lines[0]);
        for line in lines {
            assert_eq!(display_width(line), width, "ragged line: {:?}", line);
            let last = line.chars().last().unwrap();
            assert!(glyphs.is_border(last), "line does not end on a border: {:?}", line);
        }
    }

    mod widths {
        use super::*;

        #[test]
        fn columns_fit_target() {
            assert_eq!(column_width(2, 95), 43);
            assert_eq!(column_width(2, 119), 55);
            assert_eq!(column_width(4, 95), 21);
        }

        #[test]
        fn minimum_width_when_crowded() {
            assert_eq!(column_width(8, 40), MIN_COLUMN_WIDTH);
            assert_eq!(column_width(1, 3), MIN_COLUMN_WIDTH);
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn cells_start_then_continue() {
            let events = congress();
            let events = refs(&events);
            let table = Timetable::layout(&events, &config(95, Charset::Ascii)).unwrap();

            assert_eq!(table.grid().rows().len(), 4);
            assert!(matches!(table.cell(0, 0), Some(LayoutCell::Starts(e)) if e.id == "8425"));
            assert!(matches!(table.cell(0, 1), Some(LayoutCell::Starts(e)) if e.id == "8167"));
            for row in 1..4 {
                assert_eq!(table.cell(row, 0), Some(LayoutCell::Continues));
                assert_eq!(table.cell(row, 1), Some(LayoutCell::Continues));
            }
            assert_eq!(table.cell(4, 0), None);
        }

        #[test]
        fn gaps_are_empty() {
            let events = vec![
                Event::new("1", "Early", "Saal 1", cet(10, 0), cet(10, 30)),
                Event::new("2", "Late", "Saal 2", cet(10, 30), cet(11, 0)),
            ];
            let events = refs(&events);
            let table = Timetable::layout(&events, &config(80, Charset::Ascii)).unwrap();
            assert_eq!(table.cell(2, 0), Some(LayoutCell::Empty));
            assert_eq!(table.cell(0, 1), Some(LayoutCell::Empty));
        }

        #[test]
        fn overlapping_event_in_same_room_is_skipped() {
            let events = vec![
                Event::new("1", "First", "Saal 1", cet(10, 0), cet(11, 0)),
                Event::new("2", "Clash", "Saal 1", cet(10, 30), cet(11, 30)),
            ];
            let events = refs(&events);
            let table = Timetable::layout(&events, &config(80, Charset::Ascii)).unwrap();
            assert!(matches!(table.cell(0, 0), Some(LayoutCell::Starts(e)) if e.id == "1"));
            assert_eq!(table.cell(2, 0), Some(LayoutCell::Continues));
            assert_eq!(table.cell(4, 0), Some(LayoutCell::Empty));
        }
    }

    mod render {
        use super::*;

        #[test]
        fn empty_input() {
            let lines = render_timetable(&[], &config(80, Charset::Unicode), &Selection::new()).unwrap();
            assert_eq!(lines, vec![NO_EVENTS.to_string()]);
        }

        #[test]
        fn rectangular_in_both_charsets() {
            let events = congress();
            let events = refs(&events);
            for charset in [Charset::Ascii, Charset::Unicode] {
                for width in [40, 95, 119, 200] {
                    let config = config(width, charset);
                    let lines = render_timetable(&events, &config, &Selection::new()).unwrap();
                    assert_rectangular(&lines, config.glyphs());
                }
            }
        }

        #[test]
        fn width_matches_columns() {
            let events = congress();
            let events = refs(&events);
            let lines = render_timetable(&events, &config(95, Charset::Unicode), &Selection::new()).unwrap();
            // gutter 5 + border + 2 * (43 + border)
            assert_eq!(display_width(&lines[0]), 94);
        }

        #[test]
        fn block_lines_then_continuation() {
            let events = congress();
            let events = refs(&events);
            let config = config(95, Charset::Ascii);
            let table = Timetable::layout(&events, &config).unwrap();
            let lines = table.render(config.glyphs(), &Selection::new());

            // header, rule, 4 block lines, merged separator, then three
            // continuation rows each followed by a separator
            assert_eq!(lines.len(), 2 + 4 + 1 + 3 * 2);
            assert!(lines[2].starts_with("11:30|The Global Assassination Grid (8425)"));
            assert!(lines[6].starts_with("-----+~~~~"));
            for row_line in [7, 9, 11] {
                let cells: Vec<&str> = lines[row_line].split('|').collect();
                assert_eq!(cells[1], "~".repeat(43));
                assert_eq!(cells[2], "~".repeat(43));
            }
            assert_eq!(lines[9].split('|').next(), Some("12:00"));
            assert!(!lines[12].contains('~'));
        }

        #[test]
        fn wider_target_shows_more_per_line() {
            let events = congress();
            let events = refs(&events);
            let narrow = Timetable::layout(&events, &config(95, Charset::Ascii)).unwrap();
            let wide = Timetable::layout(&events, &config(119, Charset::Ascii)).unwrap();

            let long = events[1];
            let narrow_block = format_cell(long, narrow.column_width(), 4, false, Glyphs::for_charset(Charset::Ascii));
            let wide_block = format_cell(long, wide.column_width(), 4, false, Glyphs::for_charset(Charset::Ascii));

            assert!(wide_block[0].trim_end().len() > narrow_block[0].trim_end().len());
            let text_lines = |block: &[String]| block.iter().filter(|l| !l.trim().is_empty()).count();
            assert!(text_lines(&wide_block) <= text_lines(&narrow_block));
        }

        #[test]
        fn too_many_rooms_overflow_instead_of_dropping() {
            let events: Vec<Event> = (0..8)
                .map(|i| {
                    Event::new(
                        i.to_string(),
                        format!("Talk {}", i),
                        format!("Room {}", i),
                        cet(10, 0),
                        cet(10, 30),
                    )
                })
                .collect();
            let events = refs(&events);
            let config = config(40, Charset::Unicode);
            let lines = render_timetable(&events, &config, &Selection::new()).unwrap();

            assert_rectangular(&lines, config.glyphs());
            assert_eq!(display_width(&lines[0]), 6 + 8 * (MIN_COLUMN_WIDTH + 1));
            for i in 0..8 {
                assert!(lines[0].contains(&format!("Room {}", i)));
            }
        }

        #[test]
        fn selected_events_are_marked() {
            let events = congress();
            let events = refs(&events);
            let selection: Selection = ["8167"].into_iter().collect();
            let lines = render_timetable(&events, &config(95, Charset::Ascii), &selection).unwrap();
            assert!(lines[2].contains("|* Everything"));
            assert!(lines[2].contains("|The Global"));
        }

        #[test]
        fn backwards_event_is_an_error() {
            let events = vec![
                Event::new("1", "Fine", "Saal 1", cet(10, 0), cet(10, 30)),
                Event::new("2", "Backwards", "Saal 2", cet(11, 0), cet(10, 0)),
            ];
            let events = refs(&events);
            let result = render_timetable(&events, &config(80, Charset::Ascii), &Selection::new());
            assert!(matches!(
                result,
                Err(ScheduleError::MalformedEvent { ref id, .. }) if id == "2"
            ));
        }

        #[test]
        fn roomless_event_is_an_error() {
            let events = vec![Event::new("1", "Nowhere", " ", cet(10, 0), cet(10, 30))];
            let events = refs(&events);
            assert!(Timetable::layout(&events, &config(80, Charset::Ascii)).is_err());
        }

        #[test]
        fn total_width_matches_lines() {
            let events = congress();
            let events = refs(&events);
            let config = config(119, Charset::Unicode);
            let table = Timetable::layout(&events, &config).unwrap();
            let lines = table.render(config.glyphs(), &Selection::new());
            assert_eq!(table.total_width(), 6 + 2 * (55 + 1));
            assert!(lines.iter().all(|l| display_width(l) == table.total_width()));
        }

        #[test]
        fn long_room_names_are_ellipsized() {
            let events = vec![Event::new(
                "1",
                "Talk",
                "A room with a very long name indeed",
                cet(10, 0),
                cet(10, 15),
            )];
            let events = refs(&events);
            let lines = render_timetable(&events, &config(20, Charset::Ascii), &Selection::new()).unwrap();
            assert_eq!(lines[0], "     |A room wit...|");
        }
    }
}
