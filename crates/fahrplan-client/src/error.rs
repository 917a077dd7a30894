//! Client error types.

use std::fmt;
use std::path::PathBuf;

use fahrplan_core::ScheduleError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The schedule file could not be read or understood.
    Schedule { path: PathBuf, message: String },
    /// Invalid `--date` value.
    Date(String),
    /// Filtering or rendering rejected the request.
    Core(ScheduleError),
    /// IO error.
    Io(std::io::Error),
}

impl ClientError {
    pub fn schedule(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Self::Schedule {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Schedule { path, message } => {
                write!(f, "cannot load schedule {}: {}", path.display(), message)
            }
            Self::Date(msg) => write!(f, "invalid date: {}", msg),
            Self::Core(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ScheduleError> for ClientError {
    fn from(err: ScheduleError) -> Self {
        Self::Core(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_message() {
        let err: ClientError = ScheduleError::not_found("9999").into();
        assert_eq!(err.to_string(), "no such event: 9999");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn schedule_error_names_the_file() {
        let err = ClientError::schedule("/tmp/schedule.json", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "cannot load schedule /tmp/schedule.json: expected value at line 1"
        );
    }
}
