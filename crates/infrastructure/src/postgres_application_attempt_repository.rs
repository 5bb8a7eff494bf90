//! PostgreSQL-backed application attempt log using the `application_attempts` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use jobboard_application::ApplicationAttemptRepository;
use jobboard_core::{AppError, AppResult};
use jobboard_domain::{ApplicationAttempt, IpHash, VacancyId};

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the application attempt repository port.
#[derive(Clone)]
pub struct PostgresApplicationAttemptRepository {
    pool: PgPool,
}

impl PostgresApplicationAttemptRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationAttemptRepository for PostgresApplicationAttemptRepository {
    async fn has_attempt_since(
        &self,
        vacancy_id: &VacancyId,
        ip_hash: &IpHash,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM application_attempts
                WHERE vacancy_id = $1
                  AND ip_hash = $2
                  AND created_at >= $3
            )
            "#,
        )
        .bind(vacancy_id.as_str())
        .bind(ip_hash.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to look up application attempts for vacancy '{vacancy_id}': {error}"
            ))
        })
    }

    async fn append_attempt(&self, attempt: ApplicationAttempt) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO application_attempts (
                vacancy_id,
                ip_hash,
                user_agent,
                session_id,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(attempt.vacancy_id().as_str())
        .bind(attempt.ip_hash().as_str())
        .bind(attempt.user_agent())
        .bind(attempt.session_id())
        .bind(attempt.created_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to append application attempt for vacancy '{}': {error}",
                attempt.vacancy_id()
            ))
        })?;

        Ok(())
    }
}
