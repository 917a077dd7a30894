//! Core types: events, filters, interval grid and schedule rendering

pub mod cell;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod glyphs;
pub mod grid;
pub mod individual;
pub mod text;
pub mod time;
pub mod timetable;
pub mod tracing;

pub use cell::{Field, Priority, fit_fields, format_cell};
pub use config::{DEFAULT_INTERVAL_MINUTES, Detail, MIN_COLUMN_WIDTH, RenderConfig};
pub use error::{ScheduleError, ScheduleResult};
pub use event::{Event, Selection};
pub use filter::{EventFilter, Filtered, TimeMode, filter_rooms, filter_selected, filter_tracks};
pub use glyphs::{Charset, Glyphs};
pub use grid::IntervalGrid;
pub use individual::{render_event, render_events};
pub use text::{display_width, ellipsis, strip_html, wrap};
pub use time::{TimeWindow, truncate_to_interval};
pub use timetable::{LayoutCell, NO_EVENTS, Timetable, column_width, render_timetable};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
