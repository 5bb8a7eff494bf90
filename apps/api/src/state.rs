use jobboard_application::{OutboxService, RateLimitService, VacancyViewService};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub postgres_pool: PgPool,
    pub rate_limit_service: RateLimitService,
    pub vacancy_view_service: VacancyViewService,
    pub outbox_service: OutboxService,
    pub dispatch_shared_secret: String,
}
