use std::collections::HashMap;

use async_trait::async_trait;
use jobboard_application::VacancyViewRepository;
use jobboard_core::AppResult;
use jobboard_domain::VacancyId;
use tokio::sync::RwLock;

/// In-memory vacancy view counters.
#[derive(Debug, Default)]
pub struct InMemoryVacancyViewRepository {
    counts: RwLock<HashMap<VacancyId, i64>>,
}

impl InMemoryVacancyViewRepository {
    /// Creates an empty counter store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VacancyViewRepository for InMemoryVacancyViewRepository {
    async fn increment_views(&self, vacancy_id: &VacancyId) -> AppResult<i64> {
        let mut counts = self.counts.write().await;
        let count = counts.entry(vacancy_id.clone()).or_insert(0);
        *count = count.saturating_add(1);
        Ok(*count)
    }
}
