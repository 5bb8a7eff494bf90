use async_trait::async_trait;
use jobboard_application::NotificationSink;
use jobboard_core::{AppError, AppResult};
use jobboard_domain::OutboxEvent;
use serde_json::json;

/// HTTP webhook implementation of the notification sink port.
///
/// Each call performs exactly one POST. Retrying is left to the outbox
/// dispatcher, which counts every failed call against the event budget.
pub struct HttpWebhookNotificationSink {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpWebhookNotificationSink {
    /// Creates a sink posting to `endpoint` with the provided client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the configured webhook endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl NotificationSink for HttpWebhookNotificationSink {
    async fn deliver(&self, event: &OutboxEvent) -> AppResult<()> {
        let event_id = event.id().to_string();
        let response = self
            .http_client
            .post(self.endpoint.as_str())
            .header("Idempotency-Key", event_id.as_str())
            .header("X-Jobboard-Event", event.event_type().as_str())
            .json(&json!({
                "id": event_id,
                "event_type": event.event_type().as_str(),
                "payload": event.payload(),
                "created_at": event.created_at(),
            }))
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("notification webhook transport error: {error}"))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        Err(AppError::Internal(format!(
            "notification webhook failed with status {status}: {body}"
        )))
    }
}
