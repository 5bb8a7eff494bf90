use async_trait::async_trait;
use jobboard_application::{EventLogEntry, EventLogRepository};
use jobboard_core::AppResult;
use tokio::sync::RwLock;

/// In-memory event log, mainly for tests and local runs without PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryEventLogRepository {
    entries: RwLock<Vec<EventLogEntry>>,
}

impl InMemoryEventLogRepository {
    /// Creates an empty in-memory event log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all appended entries.
    pub async fn entries(&self) -> Vec<EventLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl EventLogRepository for InMemoryEventLogRepository {
    async fn append_entry(&self, entry: EventLogEntry) -> AppResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
