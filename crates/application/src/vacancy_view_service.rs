use std::sync::Arc;

use async_trait::async_trait;

use jobboard_core::AppResult;
use jobboard_domain::{VacancyId, VacancyViewCount};

/// Repository port for per-vacancy view counters.
#[async_trait]
pub trait VacancyViewRepository: Send + Sync {
    /// Atomically increments the counter and returns the new total.
    async fn increment_views(&self, vacancy_id: &VacancyId) -> AppResult<i64>;
}

/// Application service for vacancy view counting.
#[derive(Clone)]
pub struct VacancyViewService {
    repository: Arc<dyn VacancyViewRepository>,
}

impl VacancyViewService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn VacancyViewRepository>) -> Self {
        Self { repository }
    }

    /// Records one view of a vacancy.
    pub async fn record_view(&self, vacancy_id: &str) -> AppResult<VacancyViewCount> {
        let vacancy_id = VacancyId::new(vacancy_id)?;
        let view_count = self.repository.increment_views(&vacancy_id).await?;

        Ok(VacancyViewCount {
            vacancy_id,
            view_count,
        })
    }
}
