//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/fahrplan/config.toml` by default. Command-line flags override
//! anything set here.
//!
//! ```toml
//! [display]
//! ascii = false
//! color = true
//! interval = 15
//! width = 120
//!
//! [files]
//! schedule = "~/congress/schedule.json"
//! selection = "~/congress/selected.lst"
//! ```

use std::path::{Path, PathBuf};

use fahrplan_core::DEFAULT_INTERVAL_MINUTES;
use serde::{Deserialize, Serialize};

/// Schedule file used when neither flag nor config names one.
pub const DEFAULT_SCHEDULE_FILE: &str = "schedule.json";

/// Selection file used when neither flag nor config names one.
pub const DEFAULT_SELECTION_FILE: &str = "selected.lst";

/// Configuration for the fahrplan client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Display settings.
    pub display: DisplaySettings,

    /// Input file locations.
    pub files: FileSettings,
}

/// Display settings for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Draw with ASCII instead of Unicode box characters.
    pub ascii: bool,

    /// Colorize output on a terminal.
    pub color: bool,

    /// Minutes per timetable row.
    pub interval: u32,

    /// Fixed output width; the terminal width is used when unset.
    pub width: Option<usize>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            ascii: false,
            color: true,
            interval: DEFAULT_INTERVAL_MINUTES,
            width: None,
        }
    }
}

/// Where the schedule and selection files are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub schedule: Option<PathBuf>,
    pub selection: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it does
    /// not exist.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no render could use.
    pub fn validate(&self) -> Result<(), String> {
        if self.display.interval == 0 {
            return Err("display.interval must be at least 1 minute".to_string());
        }
        if self.display.width == Some(0) {
            return Err("display.width must be positive".to_string());
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fahrplan")
    }

    /// The schedule file: the flag, then the config file, then
    /// `schedule.json` in the working directory.
    pub fn schedule_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.files.schedule.as_deref().map(expand_home))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEDULE_FILE))
    }

    /// The selection file, resolved like [`Self::schedule_path`].
    pub fn selection_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.files.selection.as_deref().map(expand_home))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SELECTION_FILE))
    }
}

/// Expands a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
