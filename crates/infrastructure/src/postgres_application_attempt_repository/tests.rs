use chrono::{Duration, SubsecRound, Utc};
use jobboard_application::ApplicationAttemptRepository;
use jobboard_domain::{ApplicationAttempt, IpHash, VacancyId};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresApplicationAttemptRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres application attempt tests: {error}");
    }

    Some(pool)
}

fn unique_vacancy() -> VacancyId {
    match VacancyId::new(format!("vac-{}", uuid::Uuid::new_v4())) {
        Ok(vacancy_id) => vacancy_id,
        Err(error) => panic!("failed to build vacancy id: {error}"),
    }
}

fn ip_hash(byte: &str) -> IpHash {
    match IpHash::from_hex(byte.repeat(32)) {
        Ok(ip_hash) => ip_hash,
        Err(error) => panic!("failed to build ip hash: {error}"),
    }
}

#[tokio::test]
async fn lookup_matches_only_the_same_vacancy_and_hash() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresApplicationAttemptRepository::new(pool);
    let vacancy_id = unique_vacancy();
    let other_vacancy = unique_vacancy();
    let recorded_at = Utc::now().trunc_subsecs(6);

    let appended = repository
        .append_attempt(ApplicationAttempt::new(
            vacancy_id.clone(),
            ip_hash("ab"),
            Some("Mozilla/5.0".to_owned()),
            None,
            recorded_at,
        ))
        .await;
    assert!(appended.is_ok());

    let since = recorded_at - Duration::minutes(10);
    let same_pair = repository
        .has_attempt_since(&vacancy_id, &ip_hash("ab"), since)
        .await;
    let other_hash = repository
        .has_attempt_since(&vacancy_id, &ip_hash("cd"), since)
        .await;
    let other_vacancy_hit = repository
        .has_attempt_since(&other_vacancy, &ip_hash("ab"), since)
        .await;

    assert_eq!(same_pair.ok(), Some(true));
    assert_eq!(other_hash.ok(), Some(false));
    assert_eq!(other_vacancy_hit.ok(), Some(false));
}

#[tokio::test]
async fn window_start_is_inclusive() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresApplicationAttemptRepository::new(pool);
    let vacancy_id = unique_vacancy();
    let recorded_at = Utc::now().trunc_subsecs(6) - Duration::minutes(10);

    let appended = repository
        .append_attempt(ApplicationAttempt::new(
            vacancy_id.clone(),
            ip_hash("ef"),
            None,
            Some("session-1".to_owned()),
            recorded_at,
        ))
        .await;
    assert!(appended.is_ok());

    let at_boundary = repository
        .has_attempt_since(&vacancy_id, &ip_hash("ef"), recorded_at)
        .await;
    let after_boundary = repository
        .has_attempt_since(
            &vacancy_id,
            &ip_hash("ef"),
            recorded_at + Duration::microseconds(1),
        )
        .await;

    assert_eq!(at_boundary.ok(), Some(true));
    assert_eq!(after_boundary.ok(), Some(false));
}
