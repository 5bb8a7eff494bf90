use async_trait::async_trait;
use sqlx::PgPool;

use jobboard_application::{EventLogEntry, EventLogRepository};
use jobboard_core::{AppError, AppResult};

/// PostgreSQL-backed repository for informational event log entries.
#[derive(Clone)]
pub struct PostgresEventLogRepository {
    pool: PgPool,
}

impl PostgresEventLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventLogRepository for PostgresEventLogRepository {
    async fn append_entry(&self, entry: EventLogEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO event_logs (
                action,
                resource_type,
                resource_id,
                detail
            )
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.action.as_str())
        .bind(entry.resource_type)
        .bind(entry.resource_id)
        .bind(entry.detail)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append event log entry: {error}")))?;

        Ok(())
    }
}
