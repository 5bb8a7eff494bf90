use async_trait::async_trait;
use chrono::{DateTime, Utc};

use jobboard_core::AppResult;
use jobboard_domain::{ApplicationAttempt, IpHash, VacancyId};

/// Repository port for the append-only application attempt log.
#[async_trait]
pub trait ApplicationAttemptRepository: Send + Sync {
    /// Returns whether an attempt for the pair was recorded at or after `since`.
    async fn has_attempt_since(
        &self,
        vacancy_id: &VacancyId,
        ip_hash: &IpHash,
        since: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Appends an attempt record. Records are never updated afterwards.
    async fn append_attempt(&self, attempt: ApplicationAttempt) -> AppResult<()>;
}
