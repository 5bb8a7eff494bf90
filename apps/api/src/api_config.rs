use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use jobboard_application::{
    DEFAULT_APPLICATION_WINDOW_SECONDS, DEFAULT_DISPATCH_BATCH_SIZE,
    DEFAULT_MAX_DELIVERY_ATTEMPTS,
};
use jobboard_core::AppError;
use jobboard_infrastructure::NotificationSinkConfig;
use tracing_subscriber::EnvFilter;

const MIN_DISPATCH_SECRET_LENGTH: usize = 16;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub ip_hash_salt: Option<String>,
    pub application_window_seconds: i64,
    pub dispatch_shared_secret: String,
    pub outbox_max_attempts: u32,
    pub outbox_batch_size: usize,
    pub notification_sink: NotificationSinkConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let ip_hash_salt = optional_non_empty_env("IP_HASH_SALT");
        let application_window_seconds = parse_env_i64(
            "APPLICATION_RATE_LIMIT_WINDOW_SECONDS",
            DEFAULT_APPLICATION_WINDOW_SECONDS,
        )?;

        let dispatch_shared_secret = required_non_empty_env("DISPATCH_SHARED_SECRET")?;
        if dispatch_shared_secret.len() < MIN_DISPATCH_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "DISPATCH_SHARED_SECRET must be at least {MIN_DISPATCH_SECRET_LENGTH} characters"
            )));
        }

        let outbox_max_attempts = parse_env_u32("OUTBOX_MAX_ATTEMPTS", DEFAULT_MAX_DELIVERY_ATTEMPTS)?;
        let outbox_batch_size = parse_env_usize("OUTBOX_BATCH_SIZE", DEFAULT_DISPATCH_BATCH_SIZE)?;

        let notification_sink = NotificationSinkConfig::parse(
            env::var("NOTIFICATION_SINK").ok().as_deref(),
            optional_non_empty_env("NOTIFICATION_WEBHOOK_URL"),
            parse_env_u64("NOTIFICATION_TIMEOUT_SECONDS", 10)?,
        )?;

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            ip_hash_salt,
            application_window_seconds,
            dispatch_shared_secret,
            outbox_max_attempts,
            outbox_batch_size,
            notification_sink,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn optional_non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_env_i64(name: &str, default: i64) -> Result<i64, AppError> {
    match env::var(name) {
        Ok(value) => value.parse::<i64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> Result<u32, AppError> {
    match env::var(name) {
        Ok(value) => value.parse::<u32>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, AppError> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, AppError> {
    match env::var(name) {
        Ok(value) => value.parse::<usize>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
