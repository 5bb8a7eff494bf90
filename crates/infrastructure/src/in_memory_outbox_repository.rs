use std::collections::HashMap;

use async_trait::async_trait;
use jobboard_application::OutboxRepository;
use jobboard_core::{AppError, AppResult};
use jobboard_domain::{OutboxEvent, OutboxEventId, OutboxStatus};
use tokio::sync::RwLock;

/// In-memory outbox repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryOutboxRepository {
    events: RwLock<HashMap<OutboxEventId, OutboxEvent>>,
}

impl InMemoryOutboxRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl OutboxRepository for InMemoryOutboxRepository {
    async fn enqueue_event(&self, event: OutboxEvent) -> AppResult<()> {
        let mut events = self.events.write().await;

        if events.contains_key(&event.id()) {
            return Err(AppError::Conflict(format!(
                "outbox event '{}' already exists",
                event.id()
            )));
        }

        events.insert(event.id(), event);
        Ok(())
    }

    async fn list_dispatchable_events(
        &self,
        max_attempts: u32,
        limit: usize,
    ) -> AppResult<Vec<OutboxEvent>> {
        let events = self.events.read().await;

        let mut values: Vec<OutboxEvent> = events
            .values()
            .filter(|event| event.is_dispatchable(max_attempts))
            .cloned()
            .collect();
        values.sort_by_key(OutboxEvent::created_at);
        values.truncate(limit);

        Ok(values)
    }

    async fn save_delivery_state(
        &self,
        event: &OutboxEvent,
        selected_try_count: u32,
    ) -> AppResult<()> {
        let mut events = self.events.write().await;

        let stored = events.get_mut(&event.id()).ok_or_else(|| {
            AppError::NotFound(format!("outbox event '{}' does not exist", event.id()))
        })?;
        if stored.status() != OutboxStatus::Pending {
            return Err(AppError::Conflict(format!(
                "outbox event '{}' is no longer pending",
                event.id()
            )));
        }
        if stored.try_count() != selected_try_count {
            return Err(AppError::Conflict(format!(
                "outbox event '{}' was updated by another dispatch cycle",
                event.id()
            )));
        }

        *stored = event.clone();
        Ok(())
    }

    async fn find_event(&self, event_id: OutboxEventId) -> AppResult<Option<OutboxEvent>> {
        Ok(self.events.read().await.get(&event_id).cloned())
    }
}
