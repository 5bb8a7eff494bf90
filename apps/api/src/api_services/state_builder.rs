use std::sync::Arc;

use jobboard_application::{
    ApplicationRateLimitRule, DispatchPolicy, EventLogService, IpFingerprinter, OutboxService,
    RateLimitService, VacancyViewService,
};
use jobboard_core::AppError;
use jobboard_infrastructure::{
    PostgresApplicationAttemptRepository, PostgresEventLogRepository, PostgresOutboxRepository,
    PostgresVacancyViewRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let event_log_service =
        EventLogService::new(Arc::new(PostgresEventLogRepository::new(pool.clone())));

    let rate_limit_service = RateLimitService::new(
        Arc::new(PostgresApplicationAttemptRepository::new(pool.clone())),
        event_log_service,
        IpFingerprinter::new(config.ip_hash_salt.clone()),
        ApplicationRateLimitRule::new(config.application_window_seconds)?,
    );

    let outbox_service = OutboxService::new(
        Arc::new(PostgresOutboxRepository::new(pool.clone())),
        config.notification_sink.build_sink()?,
        DispatchPolicy::new(config.outbox_max_attempts, config.outbox_batch_size)?,
    );

    Ok(AppState {
        vacancy_view_service: VacancyViewService::new(Arc::new(
            PostgresVacancyViewRepository::new(pool.clone()),
        )),
        postgres_pool: pool,
        rate_limit_service,
        outbox_service,
        dispatch_shared_secret: config.dispatch_shared_secret.clone(),
    })
}
