//! Application services and ports.

#![forbid(unsafe_code)]

mod event_log_service;
mod outbox_ports;
mod outbox_service;
mod rate_limit_service;
mod vacancy_view_service;

pub use event_log_service::{EventLogEntry, EventLogRepository, EventLogService};
pub use outbox_ports::{NotificationSink, OutboxRepository};
pub use outbox_service::{
    DEFAULT_DISPATCH_BATCH_SIZE, DEFAULT_MAX_DELIVERY_ATTEMPTS, DispatchCycleReport,
    DispatchOutcome, DispatchPolicy, DispatchResult, OutboxService,
};
pub use rate_limit_service::{
    ApplicationAttemptInput, ApplicationAttemptRepository, ApplicationRateLimitRule,
    DEFAULT_APPLICATION_WINDOW_SECONDS, FALLBACK_CALLER_ADDRESS, FALLBACK_IP_HASH_SALT,
    IpFingerprinter, RateLimitDecision, RateLimitService,
};
pub use vacancy_view_service::{VacancyViewRepository, VacancyViewService};
