//! Per-call render settings.

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::glyphs::{Charset, Glyphs};

/// Default row granularity in minutes.
pub const DEFAULT_INTERVAL_MINUTES: u32 = 15;

/// Narrowest column any event text is laid out in.
pub const MIN_COLUMN_WIDTH: usize = 10;

/// How much of an event the individual view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detail {
    /// Header fields only.
    #[default]
    Short,
    /// Header fields plus abstract and description.
    Full,
}

/// Immutable settings for a single render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    interval_minutes: u32,
    width: usize,
    detail: Detail,
    charset: Charset,
    color: bool,
}

impl RenderConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidConfig`] for a zero interval or zero
    /// width.
    pub fn new(interval_minutes: u32, width: usize) -> ScheduleResult<Self> {
        if interval_minutes == 0 {
            return Err(ScheduleError::invalid_config(
                "interval must be a positive number of minutes",
            ));
        }
        if width == 0 {
            return Err(ScheduleError::invalid_config(
                "target width must be positive",
            ));
        }
        Ok(Self {
            interval_minutes,
            width,
            detail: Detail::default(),
            charset: Charset::default(),
            color: true,
        })
    }

    /// Builder method to set the detail level.
    #[must_use]
    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    /// Builder method to set the character set.
    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Builder method to toggle color output.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn detail(&self) -> Detail {
        self.detail
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Whether a presentation layer should colorize the output.
    pub fn color(&self) -> bool {
        self.color
    }

    /// The glyph table for this configuration's charset.
    pub fn glyphs(&self) -> &'static Glyphs {
        Glyphs::for_charset(self.charset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::new(DEFAULT_INTERVAL_MINUTES, 80).unwrap();
        assert_eq!(config.interval_minutes(), 15);
        assert_eq!(config.width(), 80);
        assert_eq!(config.detail(), Detail::Short);
        assert_eq!(config.charset(), Charset::Unicode);
        assert!(config.color());
    }

    #[test]
    fn builder_methods() {
        let config = RenderConfig::new(30, 120)
            .unwrap()
            .with_detail(Detail::Full)
            .with_charset(Charset::Ascii)
            .with_color(false);
        assert_eq!(config.detail(), Detail::Full);
        assert_eq!(config.glyphs().vertical, '|');
        assert!(!config.color());
    }

    #[test]
    fn rejects_zero_interval() {
        assert!(matches!(
            RenderConfig::new(0, 80),
            Err(ScheduleError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_zero_width() {
        assert!(matches!(
            RenderConfig::new(15, 0),
            Err(ScheduleError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn detail_serde() {
        let json = serde_json::to_string(&Detail::Full).unwrap();
        assert_eq!(json, "\"full\"");
    }
}
