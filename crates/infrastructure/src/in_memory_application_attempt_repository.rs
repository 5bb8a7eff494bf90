use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobboard_application::ApplicationAttemptRepository;
use jobboard_core::AppResult;
use jobboard_domain::{ApplicationAttempt, IpHash, VacancyId};
use tokio::sync::RwLock;

/// In-memory application attempt log.
#[derive(Debug, Default)]
pub struct InMemoryApplicationAttemptRepository {
    attempts: RwLock<Vec<ApplicationAttempt>>,
}

impl InMemoryApplicationAttemptRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempts: RwLock::new(Vec::new()),
        }
    }

    /// Returns how many attempts have been recorded.
    pub async fn attempt_count(&self) -> usize {
        self.attempts.read().await.len()
    }
}

#[async_trait]
impl ApplicationAttemptRepository for InMemoryApplicationAttemptRepository {
    async fn has_attempt_since(
        &self,
        vacancy_id: &VacancyId,
        ip_hash: &IpHash,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        let attempts = self.attempts.read().await;

        Ok(attempts.iter().any(|attempt| {
            attempt.vacancy_id() == vacancy_id
                && attempt.ip_hash() == ip_hash
                && attempt.created_at() >= since
        }))
    }

    async fn append_attempt(&self, attempt: ApplicationAttempt) -> AppResult<()> {
        self.attempts.write().await.push(attempt);
        Ok(())
    }
}
