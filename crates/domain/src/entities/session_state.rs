//! Form session lifecycle

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of a form session
///
/// `Idle → DateSelected → FieldsEdited* → Submitting → ResultsReady | SubmissionFailed`.
/// Selecting a new date from any state other than `Submitting` returns to
/// `DateSelected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No date selected yet
    #[default]
    Idle,
    /// Fields populated from the record for the selected date
    DateSelected,
    /// At least one field was edited since the date was selected
    FieldsEdited,
    /// A submission is in flight
    Submitting,
    /// The last submission produced a forecast and summary
    ResultsReady,
    /// The last submission failed
    SubmissionFailed,
}

impl SessionState {
    /// Whether a field set exists in this state
    #[must_use]
    pub const fn has_fields(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Whether the state ends a submission
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::ResultsReady | Self::SubmissionFailed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::DateSelected => "date_selected",
            Self::FieldsEdited => "fields_edited",
            Self::Submitting => "submitting",
            Self::ResultsReady => "results_ready",
            Self::SubmissionFailed => "submission_failed",
        };
        f.write_str(s)
    }
}
