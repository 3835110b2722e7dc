//! Application-level errors

use chrono::NaiveDate;
use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Record source missing or malformed
    #[error("Failed to load weather records: {0}")]
    Load(String),

    /// No record exists for the selected date
    #[error("No weather record for {date}")]
    Selection { date: NaiveDate },

    /// More than one record carries the same date
    #[error("Record source is corrupt: {count} records for {date}")]
    Integrity { date: NaiveDate, count: usize },

    /// Forecast service failed, timed out or returned an unusable response
    #[error("Forecast service error: {0}")]
    Forecast(String),

    /// Summarization service failed or timed out
    #[error("Summary service error: {0}")]
    Summary(String),

    /// Operation not allowed in the session's current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Another operation on the same session is still running
    #[error("Session busy: {0}")]
    SessionBusy(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Stable machine-readable code for the error kind
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Domain(_) => "invalid_input",
            Self::Load(_) => "load_error",
            Self::Selection { .. } => "selection_error",
            Self::Integrity { .. } => "integrity_error",
            Self::Forecast(_) => "forecast_error",
            Self::Summary(_) => "summary_error",
            Self::InvalidOperation(_) => "invalid_operation",
            Self::SessionBusy(_) => "session_busy",
            Self::NotFound(_) => "not_found",
            Self::Configuration(_) => "configuration_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the error came from an external collaborator during submit
    pub const fn is_submission_failure(&self) -> bool {
        matches!(self, Self::Forecast(_) | Self::Summary(_))
    }
}
