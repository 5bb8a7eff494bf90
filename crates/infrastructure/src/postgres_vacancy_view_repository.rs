use async_trait::async_trait;
use sqlx::PgPool;

use jobboard_application::VacancyViewRepository;
use jobboard_core::{AppError, AppResult};
use jobboard_domain::VacancyId;

/// PostgreSQL-backed vacancy view counters.
#[derive(Clone)]
pub struct PostgresVacancyViewRepository {
    pool: PgPool,
}

impl PostgresVacancyViewRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacancyViewRepository for PostgresVacancyViewRepository {
    async fn increment_views(&self, vacancy_id: &VacancyId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO vacancy_view_counts (vacancy_id, view_count, updated_at)
            VALUES ($1, 1, now())
            ON CONFLICT (vacancy_id) DO UPDATE
            SET
                view_count = vacancy_view_counts.view_count + 1,
                updated_at = now()
            RETURNING view_count
            "#,
        )
        .bind(vacancy_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to increment views for vacancy '{vacancy_id}': {error}"
            ))
        })
    }
}
