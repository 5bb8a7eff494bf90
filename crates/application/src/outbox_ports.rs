use async_trait::async_trait;

use jobboard_core::AppResult;
use jobboard_domain::{OutboxEvent, OutboxEventId};

/// Repository port for the outbox event queue table.
#[async_trait]
pub trait OutboxRepository: Send + Sync {
    /// Inserts a new pending event.
    async fn enqueue_event(&self, event: OutboxEvent) -> AppResult<()>;

    /// Lists up to `limit` pending events with `try_count < max_attempts`,
    /// oldest first.
    async fn list_dispatchable_events(
        &self,
        max_attempts: u32,
        limit: usize,
    ) -> AppResult<Vec<OutboxEvent>>;

    /// Persists status, try count, last error and update timestamp of an event
    /// that is still pending with the `selected_try_count` it was read with.
    ///
    /// Returns `AppError::Conflict` when another cycle has already stored a
    /// transition for the event.
    async fn save_delivery_state(
        &self,
        event: &OutboxEvent,
        selected_try_count: u32,
    ) -> AppResult<()>;

    /// Finds one event by identifier.
    async fn find_event(&self, event_id: OutboxEventId) -> AppResult<Option<OutboxEvent>>;
}

/// Port for the external notification destination.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one event. Any error counts as a failed delivery attempt.
    async fn deliver(&self, event: &OutboxEvent) -> AppResult<()>;
}
