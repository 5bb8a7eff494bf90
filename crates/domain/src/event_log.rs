use serde::{Deserialize, Serialize};

/// Stable event log actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLogAction {
    /// Emitted when a guest or candidate application attempt is recorded.
    ApplicationAttemptRecorded,
}

impl EventLogAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationAttemptRecorded => "application.attempt.recorded",
        }
    }
}
