use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use jobboard_core::AppResult;
use jobboard_domain::EventLogAction;

/// Informational event written to the generic event log.
#[derive(Debug, Clone, PartialEq)]
pub struct EventLogEntry {
    /// Stable action identifier.
    pub action: EventLogAction,
    /// Kind of resource the event refers to.
    pub resource_type: String,
    /// Identifier of the referenced resource.
    pub resource_id: String,
    /// Optional structured detail.
    pub detail: Option<Value>,
}

/// Repository port for event log persistence.
#[async_trait]
pub trait EventLogRepository: Send + Sync {
    /// Appends an event log entry.
    async fn append_entry(&self, entry: EventLogEntry) -> AppResult<()>;
}

/// Application service for event log recording.
#[derive(Clone)]
pub struct EventLogService {
    repository: Arc<dyn EventLogRepository>,
}

impl EventLogService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn EventLogRepository>) -> Self {
        Self { repository }
    }

    /// Persists an event log entry.
    pub async fn record_entry(&self, entry: EventLogEntry) -> AppResult<()> {
        self.repository.append_entry(entry).await
    }
}
