use jobboard_core::{AppError, AppResult};

/// Default number of delivery attempts before an event is marked failed.
pub const DEFAULT_MAX_DELIVERY_ATTEMPTS: u32 = 3;

/// Default number of events handled per dispatch cycle.
pub const DEFAULT_DISPATCH_BATCH_SIZE: usize = 10;

/// Retry budget and batch size for the outbox dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    max_attempts: u32,
    batch_size: usize,
}

impl DispatchPolicy {
    /// Creates a validated dispatch policy.
    pub fn new(max_attempts: u32, batch_size: usize) -> AppResult<Self> {
        if max_attempts == 0 {
            return Err(AppError::Validation(
                "outbox max_attempts must be greater than zero".to_owned(),
            ));
        }

        if batch_size == 0 {
            return Err(AppError::Validation(
                "outbox batch_size must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            max_attempts,
            batch_size,
        })
    }

    /// Returns the delivery attempt budget.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the per-cycle batch size.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_DELIVERY_ATTEMPTS,
            batch_size: DEFAULT_DISPATCH_BATCH_SIZE,
        }
    }
}
