//! Console notification sink for development. Logs deliveries to tracing output.

use async_trait::async_trait;
use jobboard_application::NotificationSink;
use jobboard_core::AppResult;
use jobboard_domain::OutboxEvent;
use tracing::info;

/// Development notification sink that logs every event it receives.
#[derive(Clone)]
pub struct ConsoleNotificationSink;

impl ConsoleNotificationSink {
    /// Creates a new console notification sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for ConsoleNotificationSink {
    async fn deliver(&self, event: &OutboxEvent) -> AppResult<()> {
        info!(
            event_id = %event.id(),
            event_type = event.event_type().as_str(),
            try_count = event.try_count(),
            "--- NOTIFICATION (console) ---\n{}\n--- END NOTIFICATION ---",
            event.payload()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jobboard_application::NotificationSink;
    use jobboard_domain::OutboxEvent;
    use serde_json::json;

    use super::ConsoleNotificationSink;

    #[tokio::test]
    async fn console_sink_always_accepts_delivery() {
        let Ok(event) = OutboxEvent::new("application_created", json!({"id": 1}), Utc::now())
        else {
            panic!("failed to build outbox event");
        };

        assert!(ConsoleNotificationSink::new().deliver(&event).await.is_ok());
    }
}
