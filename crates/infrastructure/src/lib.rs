//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_notification_sink;
mod http_webhook_notification_sink;
mod in_memory_application_attempt_repository;
mod in_memory_event_log_repository;
mod in_memory_outbox_repository;
mod in_memory_vacancy_view_repository;
mod notification_sink_config;
mod postgres_application_attempt_repository;
mod postgres_event_log_repository;
mod postgres_outbox_repository;
mod postgres_vacancy_view_repository;

pub use console_notification_sink::ConsoleNotificationSink;
pub use http_webhook_notification_sink::HttpWebhookNotificationSink;
pub use in_memory_application_attempt_repository::InMemoryApplicationAttemptRepository;
pub use in_memory_event_log_repository::InMemoryEventLogRepository;
pub use in_memory_outbox_repository::InMemoryOutboxRepository;
pub use in_memory_vacancy_view_repository::InMemoryVacancyViewRepository;
pub use notification_sink_config::NotificationSinkConfig;
pub use postgres_application_attempt_repository::PostgresApplicationAttemptRepository;
pub use postgres_event_log_repository::PostgresEventLogRepository;
pub use postgres_outbox_repository::PostgresOutboxRepository;
pub use postgres_vacancy_view_repository::PostgresVacancyViewRepository;
