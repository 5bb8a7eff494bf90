use jobboard_core::{AppError, AppResult};

/// Default duplicate-suppression window: ten minutes.
pub const DEFAULT_APPLICATION_WINDOW_SECONDS: i64 = 10 * 60;

/// Address used when no caller address can be derived from the request.
pub const FALLBACK_CALLER_ADDRESS: &str = "0.0.0.0";

/// Configuration for the application duplicate-suppression rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationRateLimitRule {
    window_seconds: i64,
}

impl ApplicationRateLimitRule {
    /// Creates a rule with the given trailing window.
    pub fn new(window_seconds: i64) -> AppResult<Self> {
        if window_seconds <= 0 {
            return Err(AppError::Validation(
                "application rate limit window must be greater than zero".to_owned(),
            ));
        }

        Ok(Self { window_seconds })
    }

    /// Returns the trailing window in seconds.
    #[must_use]
    pub fn window_seconds(&self) -> i64 {
        self.window_seconds
    }

    /// Returns the trailing window as a duration.
    #[must_use]
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.window_seconds)
    }
}

impl Default for ApplicationRateLimitRule {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_APPLICATION_WINDOW_SECONDS,
        }
    }
}
