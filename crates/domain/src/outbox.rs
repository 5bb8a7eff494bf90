//! Outbox events queued for asynchronous notification delivery.
//!
//! An event starts `pending` with `try_count = 0`. Each failed delivery
//! increments `try_count`; reaching the attempt budget moves the event to
//! `failed`. A successful delivery moves it to `sent`. Both `sent` and
//! `failed` are terminal.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use jobboard_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier of an outbox event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutboxEventId(Uuid);

impl OutboxEventId {
    /// Creates a random event identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an event identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OutboxEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OutboxEventId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Delivery status of an outbox event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboxStatus {
    /// Waiting for delivery.
    Pending,
    /// Delivered successfully.
    Sent,
    /// Attempt budget exhausted.
    Failed,
}

impl OutboxStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }

    /// Returns whether the status can no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sent | Self::Failed)
    }
}

impl FromStr for OutboxStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(AppError::Validation(format!(
                "unknown outbox status value '{value}'"
            ))),
        }
    }
}

/// Stored fields used to rebuild an event loaded from persistence.
#[derive(Debug, Clone)]
pub struct OutboxEventInput {
    /// Event identifier.
    pub id: OutboxEventId,
    /// Event type tag.
    pub event_type: String,
    /// Structured event payload.
    pub payload: Value,
    /// Current status.
    pub status: OutboxStatus,
    /// Failed delivery attempts so far.
    pub try_count: u32,
    /// Most recent failure reason.
    pub last_error: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last transition timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Domain event waiting in the outbox for notification delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxEvent {
    id: OutboxEventId,
    event_type: NonEmptyString,
    payload: Value,
    status: OutboxStatus,
    try_count: u32,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OutboxEvent {
    /// Creates a fresh pending event.
    pub fn new(
        event_type: impl Into<String>,
        payload: Value,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let event_type = NonEmptyString::new(event_type.into().trim())?;

        Ok(Self {
            id: OutboxEventId::new(),
            event_type,
            payload,
            status: OutboxStatus::Pending,
            try_count: 0,
            last_error: None,
            created_at,
            updated_at: created_at,
        })
    }

    /// Rebuilds an event from stored fields.
    pub fn restore(input: OutboxEventInput) -> AppResult<Self> {
        let OutboxEventInput {
            id,
            event_type,
            payload,
            status,
            try_count,
            last_error,
            created_at,
            updated_at,
        } = input;

        if updated_at < created_at {
            return Err(AppError::Validation(format!(
                "outbox event '{id}' has updated_at before created_at"
            )));
        }

        Ok(Self {
            id,
            event_type: NonEmptyString::new(event_type)?,
            payload,
            status,
            try_count,
            last_error,
            created_at,
            updated_at,
        })
    }

    /// Returns the event identifier.
    #[must_use]
    pub fn id(&self) -> OutboxEventId {
        self.id
    }

    /// Returns the event type tag.
    #[must_use]
    pub fn event_type(&self) -> &NonEmptyString {
        &self.event_type
    }

    /// Returns the event payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> OutboxStatus {
        self.status
    }

    /// Returns the number of failed delivery attempts.
    #[must_use]
    pub fn try_count(&self) -> u32 {
        self.try_count
    }

    /// Returns the most recent failure reason.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last transition timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether a dispatch cycle may pick this event up.
    #[must_use]
    pub fn is_dispatchable(&self, max_attempts: u32) -> bool {
        self.status == OutboxStatus::Pending && self.try_count < max_attempts
    }

    /// Marks the event delivered.
    pub fn mark_sent(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        self.require_pending()?;
        self.status = OutboxStatus::Sent;
        self.updated_at = now;
        Ok(())
    }

    /// Records one failed delivery and returns the resulting status.
    pub fn record_failure(
        &mut self,
        error: impl Into<String>,
        max_attempts: u32,
        now: DateTime<Utc>,
    ) -> AppResult<OutboxStatus> {
        self.require_pending()?;
        self.try_count = self.try_count.saturating_add(1);
        self.last_error = Some(error.into());
        if self.try_count >= max_attempts {
            self.status = OutboxStatus::Failed;
        }
        self.updated_at = now;
        Ok(self.status)
    }

    fn require_pending(&self) -> AppResult<()> {
        if self.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "outbox event '{}' is already {}",
                self.id,
                self.status.as_str()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;
    use proptest::prelude::*;
    use serde_json::json;

    use super::{OutboxEvent, OutboxStatus};

    fn pending_event() -> OutboxEvent {
        match OutboxEvent::new(
            "application_created",
            json!({"vacancy_id": "vac-1"}),
            Utc::now(),
        ) {
            Ok(event) => event,
            Err(error) => panic!("fixture event must be valid: {error}"),
        }
    }

    #[test]
    fn status_roundtrip_storage_value() {
        for status in [
            OutboxStatus::Pending,
            OutboxStatus::Sent,
            OutboxStatus::Failed,
        ] {
            assert_eq!(OutboxStatus::from_str(status.as_str()).ok(), Some(status));
        }
        assert!(OutboxStatus::from_str("inflight").is_err());
    }

    #[test]
    fn new_event_starts_pending_without_tries() {
        let event = pending_event();
        assert_eq!(event.status(), OutboxStatus::Pending);
        assert_eq!(event.try_count(), 0);
        assert_eq!(event.last_error(), None);
        assert_eq!(event.created_at(), event.updated_at());
    }

    #[test]
    fn blank_event_type_is_rejected() {
        assert!(OutboxEvent::new("  ", json!({}), Utc::now()).is_err());
    }

    #[test]
    fn failures_below_budget_stay_pending() {
        let mut event = pending_event();
        let status = event.record_failure("sink unreachable", 3, Utc::now());

        assert_eq!(status.ok(), Some(OutboxStatus::Pending));
        assert_eq!(event.try_count(), 1);
        assert_eq!(event.last_error(), Some("sink unreachable"));
        assert!(event.is_dispatchable(3));
    }

    #[test]
    fn reaching_budget_moves_to_failed() {
        let mut event = pending_event();
        for _ in 0..3 {
            assert!(event.record_failure("boom", 3, Utc::now()).is_ok());
        }

        assert_eq!(event.status(), OutboxStatus::Failed);
        assert_eq!(event.try_count(), 3);
        assert!(!event.is_dispatchable(3));
        assert!(event.record_failure("again", 3, Utc::now()).is_err());
    }

    #[test]
    fn sent_is_terminal() {
        let mut event = pending_event();
        assert!(event.record_failure("first try failed", 3, Utc::now()).is_ok());
        assert!(event.mark_sent(Utc::now()).is_ok());

        assert_eq!(event.status(), OutboxStatus::Sent);
        assert_eq!(event.try_count(), 1);
        assert!(!event.is_dispatchable(3));
        assert!(event.mark_sent(Utc::now()).is_err());
        assert!(event.record_failure("late", 3, Utc::now()).is_err());
    }

    proptest! {
        #[test]
        fn try_count_never_exceeds_budget(max_attempts in 1_u32..8, failures in 0_u32..16) {
            let mut event = pending_event();
            for _ in 0..failures {
                let _ = event.record_failure("boom", max_attempts, Utc::now());
            }

            prop_assert!(event.try_count() <= max_attempts);
            prop_assert_eq!(
                event.status() == OutboxStatus::Failed,
                failures >= max_attempts
            );
        }
    }
}
