//! Core error types.

use thiserror::Error;

/// Result type for filtering and rendering operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors that can occur while selecting or rendering events.
///
/// Content that does not fit is never an error: text is truncated and
/// columns overflow the requested width instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A single event was requested by id but is not in the schedule.
    #[error("no such event: {id}")]
    NotFound { id: String },

    /// Render settings or mode flags that cannot be honored.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// An event violates the schedule invariants (empty span, no room).
    #[error("malformed event {id}: {reason}")]
    MalformedEvent { id: String, reason: String },
}

impl ScheduleError {
    /// Creates a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a malformed event error.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
