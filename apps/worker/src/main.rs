//! Job board outbox dispatch worker runtime.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use jobboard_application::{
    DEFAULT_DISPATCH_BATCH_SIZE, DEFAULT_MAX_DELIVERY_ATTEMPTS, DispatchPolicy, OutboxService,
};
use jobboard_core::{AppError, AppResult};
use jobboard_infrastructure::{NotificationSinkConfig, PostgresOutboxRepository};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct WorkerConfig {
    database_url: String,
    max_attempts: u32,
    batch_size: usize,
    sink: NotificationSinkConfig,
    poll_interval_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = WorkerConfig::load()?;
    let pool = connect_pool(config.database_url.as_str()).await?;
    let outbox_service = build_outbox_service(pool, &config)?;

    let policy = outbox_service.policy();
    info!(
        max_attempts = policy.max_attempts(),
        batch_size = policy.batch_size(),
        poll_interval_ms = config.poll_interval_ms,
        sink = config.sink.label(),
        "jobboard-worker started"
    );

    loop {
        match outbox_service.run_dispatch_cycle().await {
            // A full batch that made progress means a backlog; poll again right away.
            Ok(report) if report.processed >= policy.batch_size() && report.sent_count() > 0 => {
                continue;
            }
            Ok(_) => {}
            Err(error) => {
                warn!(error = %error, "failed to run outbox dispatch cycle");
            }
        }

        tokio::time::sleep(Duration::from_millis(config.poll_interval_ms)).await;
    }
}

async fn connect_pool(database_url: &str) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))
}

fn build_outbox_service(pool: PgPool, config: &WorkerConfig) -> AppResult<OutboxService> {
    Ok(OutboxService::new(
        Arc::new(PostgresOutboxRepository::new(pool)),
        config.sink.build_sink()?,
        DispatchPolicy::new(config.max_attempts, config.batch_size)?,
    ))
}

impl WorkerConfig {
    fn load() -> AppResult<Self> {
        let database_url = required_env("DATABASE_URL")?;
        let max_attempts = parse_env_u32("OUTBOX_MAX_ATTEMPTS", DEFAULT_MAX_DELIVERY_ATTEMPTS)?;
        let batch_size = parse_env_usize("OUTBOX_BATCH_SIZE", DEFAULT_DISPATCH_BATCH_SIZE)?;
        let poll_interval_ms = parse_env_u64("WORKER_POLL_INTERVAL_MS", 5000)?;

        if poll_interval_ms == 0 {
            return Err(AppError::Validation(
                "WORKER_POLL_INTERVAL_MS must be greater than zero".to_owned(),
            ));
        }

        let sink = NotificationSinkConfig::parse(
            env::var("NOTIFICATION_SINK").ok().as_deref(),
            optional_non_empty_env("NOTIFICATION_WEBHOOK_URL"),
            parse_env_u64("NOTIFICATION_TIMEOUT_SECONDS", 10)?,
        )?;

        Ok(Self {
            database_url,
            max_attempts,
            batch_size,
            sink,
            poll_interval_ms,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn optional_non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_env_usize(name: &str, default: usize) -> AppResult<usize> {
    match env::var(name) {
        Ok(value) => value.parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> AppResult<u32> {
    match env::var(name) {
        Ok(value) => value.parse::<u32>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
