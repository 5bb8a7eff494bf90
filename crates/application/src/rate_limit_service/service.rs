use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use jobboard_core::AppResult;
use jobboard_domain::{ApplicationAttempt, EventLogAction, VacancyId};

use crate::event_log_service::{EventLogEntry, EventLogService};

use super::config::{ApplicationRateLimitRule, FALLBACK_CALLER_ADDRESS};
use super::ip_fingerprint::IpFingerprinter;
use super::ports::ApplicationAttemptRepository;

/// One incoming application attempt.
#[derive(Debug, Clone, Default)]
pub struct ApplicationAttemptInput {
    /// Target vacancy identifier.
    pub vacancy_id: String,
    /// Caller address derived from trusted proxy headers.
    pub caller_address: String,
    /// Informational user agent.
    pub user_agent: Option<String>,
    /// Informational client correlation token.
    pub session_id: Option<String>,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the attempt duplicates a recent one and must be rejected.
    pub blocked: bool,
}

impl RateLimitDecision {
    const ALLOWED: Self = Self { blocked: false };
    const BLOCKED: Self = Self { blocked: true };
}

/// Application service for duplicate application suppression.
#[derive(Clone)]
pub struct RateLimitService {
    repository: Arc<dyn ApplicationAttemptRepository>,
    event_log_service: EventLogService,
    fingerprinter: IpFingerprinter,
    rule: ApplicationRateLimitRule,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ApplicationAttemptRepository>,
        event_log_service: EventLogService,
        fingerprinter: IpFingerprinter,
        rule: ApplicationRateLimitRule,
    ) -> Self {
        Self {
            repository,
            event_log_service,
            fingerprinter,
            rule,
        }
    }

    /// Checks the attempt against the trailing window and records it when allowed.
    pub async fn check_and_record(
        &self,
        input: ApplicationAttemptInput,
    ) -> AppResult<RateLimitDecision> {
        self.check_and_record_at(input, Utc::now()).await
    }

    /// Same as [`Self::check_and_record`], evaluated at `now`.
    ///
    /// Only an invalid vacancy id is returned as an error. Audit log failures
    /// are logged and the attempt is allowed.
    pub async fn check_and_record_at(
        &self,
        input: ApplicationAttemptInput,
        now: DateTime<Utc>,
    ) -> AppResult<RateLimitDecision> {
        let vacancy_id = VacancyId::new(input.vacancy_id)?;
        let caller_address = match input.caller_address.trim() {
            "" => FALLBACK_CALLER_ADDRESS,
            address => address,
        };
        let ip_hash = self.fingerprinter.fingerprint(caller_address)?;
        let since = now - self.rule.window();

        match self
            .repository
            .has_attempt_since(&vacancy_id, &ip_hash, since)
            .await
        {
            Ok(true) => {
                info!(
                    vacancy_id = %vacancy_id,
                    window_seconds = self.rule.window_seconds(),
                    "duplicate application attempt blocked"
                );
                return Ok(RateLimitDecision::BLOCKED);
            }
            Ok(false) => {}
            Err(lookup_error) => {
                error!(
                    vacancy_id = %vacancy_id,
                    error = %lookup_error,
                    "application attempt lookup failed, allowing attempt"
                );
                return Ok(RateLimitDecision::ALLOWED);
            }
        }

        let attempt = ApplicationAttempt::new(
            vacancy_id.clone(),
            ip_hash.clone(),
            input.user_agent,
            input.session_id,
            now,
        );
        let detail = serde_json::json!({
            "ip_hash": ip_hash.as_str(),
            "user_agent": attempt.user_agent(),
            "session_id": attempt.session_id(),
        });

        if let Err(append_error) = self.repository.append_attempt(attempt).await {
            error!(
                vacancy_id = %vacancy_id,
                error = %append_error,
                "failed to record application attempt"
            );
            return Ok(RateLimitDecision::ALLOWED);
        }

        let entry = EventLogEntry {
            action: EventLogAction::ApplicationAttemptRecorded,
            resource_type: "vacancy".to_owned(),
            resource_id: vacancy_id.as_str().to_owned(),
            detail: Some(detail),
        };
        if let Err(log_error) = self.event_log_service.record_entry(entry).await {
            warn!(
                vacancy_id = %vacancy_id,
                error = %log_error,
                "failed to write application attempt event log entry"
            );
        }

        Ok(RateLimitDecision::ALLOWED)
    }
}
