use std::sync::Arc;
use std::time::Duration;

use jobboard_application::NotificationSink;
use jobboard_core::{AppError, AppResult};
use url::Url;

use crate::{ConsoleNotificationSink, HttpWebhookNotificationSink};

/// Notification destination selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationSinkConfig {
    /// Log events to the console.
    Console,
    /// POST events to a webhook endpoint.
    Webhook {
        /// Absolute webhook URL.
        url: String,
        /// Per-request timeout.
        timeout_seconds: u64,
    },
}

impl NotificationSinkConfig {
    /// Parses the sink kind and its webhook settings.
    ///
    /// A missing kind selects the console sink.
    pub fn parse(
        sink: Option<&str>,
        webhook_url: Option<String>,
        timeout_seconds: u64,
    ) -> AppResult<Self> {
        match sink.map(str::trim).unwrap_or("console") {
            "console" => Ok(Self::Console),
            "webhook" => {
                let url = webhook_url.ok_or_else(|| {
                    AppError::Validation(
                        "NOTIFICATION_WEBHOOK_URL is required when NOTIFICATION_SINK is 'webhook'"
                            .to_owned(),
                    )
                })?;
                Url::parse(url.as_str()).map_err(|error| {
                    AppError::Validation(format!("invalid NOTIFICATION_WEBHOOK_URL: {error}"))
                })?;
                if timeout_seconds == 0 {
                    return Err(AppError::Validation(
                        "NOTIFICATION_TIMEOUT_SECONDS must be greater than zero".to_owned(),
                    ));
                }

                Ok(Self::Webhook {
                    url,
                    timeout_seconds,
                })
            }
            other => Err(AppError::Validation(format!(
                "NOTIFICATION_SINK must be either 'console' or 'webhook', got '{other}'"
            ))),
        }
    }

    /// Returns a short name for startup logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Webhook { .. } => "webhook",
        }
    }

    /// Builds the configured sink.
    pub fn build_sink(&self) -> AppResult<Arc<dyn NotificationSink>> {
        let sink: Arc<dyn NotificationSink> = match self {
            Self::Console => Arc::new(ConsoleNotificationSink::new()),
            Self::Webhook {
                url,
                timeout_seconds,
            } => {
                let http_client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(*timeout_seconds))
                    .build()
                    .map_err(|error| {
                        AppError::Internal(format!("failed to build HTTP client: {error}"))
                    })?;
                let sink = HttpWebhookNotificationSink::new(http_client, url.clone());
                tracing::debug!(endpoint = sink.endpoint(), "webhook notification sink ready");
                Arc::new(sink)
            }
        };

        Ok(sink)
    }
}
