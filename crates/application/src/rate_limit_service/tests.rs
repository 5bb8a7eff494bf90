use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Mutex;

use jobboard_core::{AppError, AppResult};
use jobboard_domain::{ApplicationAttempt, EventLogAction, IpHash, VacancyId};

use crate::event_log_service::{EventLogEntry, EventLogRepository, EventLogService};

use super::{
    ApplicationAttemptInput, ApplicationAttemptRepository, ApplicationRateLimitRule,
    IpFingerprinter, RateLimitService,
};

#[derive(Default)]
struct FakeAttemptRepository {
    attempts: Mutex<Vec<ApplicationAttempt>>,
    fail_lookups: bool,
}

#[async_trait]
impl ApplicationAttemptRepository for FakeAttemptRepository {
    async fn has_attempt_since(
        &self,
        vacancy_id: &VacancyId,
        ip_hash: &IpHash,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        if self.fail_lookups {
            return Err(AppError::Internal("database unavailable".to_owned()));
        }

        Ok(self.attempts.lock().await.iter().any(|attempt| {
            attempt.vacancy_id() == vacancy_id
                && attempt.ip_hash() == ip_hash
                && attempt.created_at() >= since
        }))
    }

    async fn append_attempt(&self, attempt: ApplicationAttempt) -> AppResult<()> {
        self.attempts.lock().await.push(attempt);
        Ok(())
    }
}

#[derive(Default)]
struct FakeEventLogRepository {
    entries: Mutex<Vec<EventLogEntry>>,
    fail_writes: bool,
}

#[async_trait]
impl EventLogRepository for FakeEventLogRepository {
    async fn append_entry(&self, entry: EventLogEntry) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Internal("event log unavailable".to_owned()));
        }

        self.entries.lock().await.push(entry);
        Ok(())
    }
}

fn build_service(
    attempts: Arc<FakeAttemptRepository>,
    event_log: Arc<FakeEventLogRepository>,
) -> RateLimitService {
    RateLimitService::new(
        attempts,
        EventLogService::new(event_log),
        IpFingerprinter::new(Some("test-salt".to_owned())),
        ApplicationRateLimitRule::default(),
    )
}

fn attempt_input(vacancy_id: &str, caller_address: &str) -> ApplicationAttemptInput {
    ApplicationAttemptInput {
        vacancy_id: vacancy_id.to_owned(),
        caller_address: caller_address.to_owned(),
        user_agent: Some("Mozilla/5.0".to_owned()),
        session_id: Some("session-1".to_owned()),
    }
}

fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[tokio::test]
async fn first_attempt_is_allowed_and_recorded() {
    let attempts = Arc::new(FakeAttemptRepository::default());
    let event_log = Arc::new(FakeEventLogRepository::default());
    let service = build_service(attempts.clone(), event_log.clone());

    let decision = service
        .check_and_record_at(attempt_input("vac-1", "203.0.113.7"), base_instant())
        .await;

    assert_eq!(decision.map(|value| value.blocked).ok(), Some(false));

    let stored = attempts.attempts.lock().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].vacancy_id().as_str(), "vac-1");
    assert_ne!(stored[0].ip_hash().as_str(), "203.0.113.7");
    assert_eq!(stored[0].user_agent(), Some("Mozilla/5.0"));
    assert_eq!(stored[0].created_at(), base_instant());

    let entries = event_log.entries.lock().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, EventLogAction::ApplicationAttemptRecorded);
    assert_eq!(entries[0].resource_id, "vac-1");
}

#[tokio::test]
async fn repeated_attempt_inside_window_is_blocked_without_new_record() {
    let attempts = Arc::new(FakeAttemptRepository::default());
    let event_log = Arc::new(FakeEventLogRepository::default());
    let service = build_service(attempts.clone(), event_log.clone());
    let start = base_instant();

    let first = service
        .check_and_record_at(attempt_input("vac-1", "203.0.113.7"), start)
        .await;
    let second = service
        .check_and_record_at(
            attempt_input("vac-1", "203.0.113.7"),
            start + Duration::minutes(9) + Duration::seconds(59),
        )
        .await;

    assert_eq!(first.map(|value| value.blocked).ok(), Some(false));
    assert_eq!(second.map(|value| value.blocked).ok(), Some(true));
    assert_eq!(attempts.attempts.lock().await.len(), 1);
    assert_eq!(event_log.entries.lock().await.len(), 1);
}

#[tokio::test]
async fn attempt_after_window_is_allowed_again() {
    let attempts = Arc::new(FakeAttemptRepository::default());
    let service = build_service(attempts.clone(), Arc::default());
    let start = base_instant();

    let _ = service
        .check_and_record_at(attempt_input("vac-1", "203.0.113.7"), start)
        .await;
    let later = service
        .check_and_record_at(
            attempt_input("vac-1", "203.0.113.7"),
            start + Duration::minutes(10) + Duration::seconds(1),
        )
        .await;

    assert_eq!(later.map(|value| value.blocked).ok(), Some(false));
    assert_eq!(attempts.attempts.lock().await.len(), 2);
}

#[tokio::test]
async fn other_vacancy_or_address_is_not_blocked() {
    let attempts = Arc::new(FakeAttemptRepository::default());
    let service = build_service(attempts.clone(), Arc::default());
    let start = base_instant();

    let _ = service
        .check_and_record_at(attempt_input("vac-1", "203.0.113.7"), start)
        .await;
    let other_vacancy = service
        .check_and_record_at(attempt_input("vac-2", "203.0.113.7"), start)
        .await;
    let other_address = service
        .check_and_record_at(attempt_input("vac-1", "198.51.100.4"), start)
        .await;

    assert_eq!(other_vacancy.map(|value| value.blocked).ok(), Some(false));
    assert_eq!(other_address.map(|value| value.blocked).ok(), Some(false));
    assert_eq!(attempts.attempts.lock().await.len(), 3);
}

#[tokio::test]
async fn lookup_failure_fails_open_without_recording() {
    let attempts = Arc::new(FakeAttemptRepository {
        fail_lookups: true,
        ..FakeAttemptRepository::default()
    });
    let event_log = Arc::new(FakeEventLogRepository::default());
    let service = build_service(attempts.clone(), event_log.clone());

    let decision = service
        .check_and_record(attempt_input("vac-1", "203.0.113.7"))
        .await;

    assert_eq!(decision.map(|value| value.blocked).ok(), Some(false));
    assert!(attempts.attempts.lock().await.is_empty());
    assert!(event_log.entries.lock().await.is_empty());
}

#[tokio::test]
async fn event_log_failure_does_not_fail_the_check() {
    let attempts = Arc::new(FakeAttemptRepository::default());
    let event_log = Arc::new(FakeEventLogRepository {
        fail_writes: true,
        ..FakeEventLogRepository::default()
    });
    let service = build_service(attempts.clone(), event_log);

    let decision = service
        .check_and_record(attempt_input("vac-1", "203.0.113.7"))
        .await;

    assert_eq!(decision.map(|value| value.blocked).ok(), Some(false));
    assert_eq!(attempts.attempts.lock().await.len(), 1);
}

#[tokio::test]
async fn blank_vacancy_id_is_rejected() {
    let service = build_service(Arc::default(), Arc::default());

    let decision = service
        .check_and_record(attempt_input("   ", "203.0.113.7"))
        .await;

    assert!(matches!(decision, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn blank_caller_address_is_fingerprinted_as_fallback_address() {
    let attempts = Arc::new(FakeAttemptRepository::default());
    let service = build_service(attempts.clone(), Arc::default());
    let start = base_instant();

    let _ = service
        .check_and_record_at(attempt_input("vac-1", ""), start)
        .await;
    let fallback = service
        .check_and_record_at(attempt_input("vac-1", "0.0.0.0"), start)
        .await;

    assert_eq!(fallback.map(|value| value.blocked).ok(), Some(true));
}

#[test]
fn rule_rejects_non_positive_window() {
    assert!(ApplicationRateLimitRule::new(0).is_err());
    assert_eq!(
        ApplicationRateLimitRule::new(600)
            .map(|rule| rule.window_seconds())
            .ok(),
        Some(600)
    );
}
