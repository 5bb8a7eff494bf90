//! PostgreSQL-backed outbox queue using the `outbox_events` table.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use jobboard_application::OutboxRepository;
use jobboard_core::{AppError, AppResult};
use jobboard_domain::{OutboxEvent, OutboxEventId, OutboxEventInput, OutboxStatus};


/// PostgreSQL implementation of the outbox repository port.
#[derive(Clone)]
pub struct PostgresOutboxRepository {
    pool: PgPool,
}

impl PostgresOutboxRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OutboxEventRow {
    id: uuid::Uuid,
    event_type: String,
    payload: Value,
    status: String,
    try_count: i32,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl OutboxRepository for PostgresOutboxRepository {
    async fn enqueue_event(&self, event: OutboxEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO outbox_events (
                id,
                event_type,
                payload,
                status,
                try_count,
                last_error,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.event_type().as_str())
        .bind(event.payload())
        .bind(event.status().as_str())
        .bind(try_count_to_db(event.try_count())?)
        .bind(event.last_error())
        .bind(event.created_at())
        .bind(event.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to enqueue outbox event '{}': {error}",
                event.id()
            ))
        })?;

        Ok(())
    }

    async fn list_dispatchable_events(
        &self,
        max_attempts: u32,
        limit: usize,
    ) -> AppResult<Vec<OutboxEvent>> {
        let rows = sqlx::query_as::<_, OutboxEventRow>(
            r#"
            SELECT
                id,
                event_type,
                payload,
                status,
                try_count,
                last_error,
                created_at,
                updated_at
            FROM outbox_events
            WHERE status = 'pending'
              AND try_count < $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(try_count_to_db(max_attempts)?)
        .bind(i64::try_from(limit).map_err(|error| {
            AppError::Validation(format!("invalid outbox batch limit: {error}"))
        })?)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list dispatchable outbox events: {error}"))
        })?;

        rows.into_iter().map(outbox_event_from_row).collect()
    }

    async fn save_delivery_state(
        &self,
        event: &OutboxEvent,
        selected_try_count: u32,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE outbox_events
            SET
                status = $2,
                try_count = $3,
                last_error = $4,
                updated_at = $5
            WHERE id = $1
              AND status = 'pending'
              AND try_count = $6
            "#,
        )
        .bind(event.id().as_uuid())
        .bind(event.status().as_str())
        .bind(try_count_to_db(event.try_count())?)
        .bind(event.last_error())
        .bind(event.updated_at())
        .bind(try_count_to_db(selected_try_count)?)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save delivery state for outbox event '{}': {error}",
                event.id()
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "outbox event '{}' is no longer pending with try_count {selected_try_count}",
                event.id()
            )));
        }

        Ok(())
    }

    async fn find_event(&self, event_id: OutboxEventId) -> AppResult<Option<OutboxEvent>> {
        let row = sqlx::query_as::<_, OutboxEventRow>(
            r#"
            SELECT
                id,
                event_type,
                payload,
                status,
                try_count,
                last_error,
                created_at,
                updated_at
            FROM outbox_events
            WHERE id = $1
            "#,
        )
        .bind(event_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find outbox event '{event_id}': {error}"))
        })?;

        row.map(outbox_event_from_row).transpose()
    }
}

fn try_count_to_db(value: u32) -> AppResult<i32> {
    i32::try_from(value)
        .map_err(|error| AppError::Validation(format!("invalid outbox try_count value: {error}")))
}

fn outbox_event_from_row(row: OutboxEventRow) -> AppResult<OutboxEvent> {
    let try_count = u32::try_from(row.try_count).map_err(|error| {
        AppError::Internal(format!(
            "outbox event '{}' has invalid try_count {}: {error}",
            row.id, row.try_count
        ))
    })?;

    OutboxEvent::restore(OutboxEventInput {
        id: OutboxEventId::from_uuid(row.id),
        event_type: row.event_type,
        payload: row.payload,
        status: OutboxStatus::from_str(row.status.as_str())?,
        try_count,
        last_error: row.last_error,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
