use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use jobboard_application::ApplicationAttemptInput;
use jobboard_core::AppError;
use tracing::warn;

use crate::client_address::CallerAddress;
use crate::dto::{ApplicationRateLimitRequest, ApplicationRateLimitResponse};
use crate::state::AppState;

pub async fn application_rate_limit_handler(
    State(state): State<AppState>,
    CallerAddress(caller_address): CallerAddress,
    headers: HeaderMap,
    payload: Result<Json<ApplicationRateLimitRequest>, JsonRejection>,
) -> (StatusCode, Json<ApplicationRateLimitResponse>) {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            return rate_limit_error(
                StatusCode::BAD_REQUEST,
                format!("invalid request body: {}", rejection.body_text()),
            );
        }
    };

    let user_agent = payload.user_agent.or_else(|| {
        headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    });

    let decision = state
        .rate_limit_service
        .check_and_record(ApplicationAttemptInput {
            vacancy_id: payload.vacancy_id,
            caller_address,
            user_agent,
            session_id: payload.session_id,
        })
        .await;

    match decision {
        Ok(decision) => (
            StatusCode::OK,
            Json(ApplicationRateLimitResponse {
                blocked: decision.blocked,
                error: None,
            }),
        ),
        Err(AppError::Validation(message)) => rate_limit_error(StatusCode::BAD_REQUEST, message),
        Err(error) => {
            warn!(error = %error, "application rate limit check failed");
            rate_limit_error(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

fn rate_limit_error(
    status: StatusCode,
    message: String,
) -> (StatusCode, Json<ApplicationRateLimitResponse>) {
    (
        status,
        Json(ApplicationRateLimitResponse {
            blocked: false,
            error: Some(message),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};

    use super::application_rate_limit_handler;
    use crate::client_address::CallerAddress;
    use crate::dto::ApplicationRateLimitRequest;
    use crate::handlers::test_support::in_memory_state;
    use crate::state::AppState;

    async fn submit(
        state: &AppState,
        caller_address: &str,
        vacancy_id: &str,
    ) -> (StatusCode, bool, Option<String>) {
        let (status, Json(body)) = application_rate_limit_handler(
            State(state.clone()),
            CallerAddress(caller_address.to_owned()),
            HeaderMap::new(),
            Ok(Json(ApplicationRateLimitRequest {
                vacancy_id: vacancy_id.to_owned(),
                user_agent: Some("Mozilla/5.0".to_owned()),
                session_id: None,
            })),
        )
        .await;

        (status, body.blocked, body.error)
    }

    #[tokio::test]
    async fn second_attempt_from_same_address_is_blocked() {
        let state = in_memory_state();

        let first = submit(&state, "203.0.113.9", "vac-1").await;
        let second = submit(&state, "203.0.113.9", "vac-1").await;

        assert_eq!(first, (StatusCode::OK, false, None));
        assert_eq!(second, (StatusCode::OK, true, None));
    }

    #[tokio::test]
    async fn other_vacancy_or_address_is_not_blocked() {
        let state = in_memory_state();

        let _ = submit(&state, "203.0.113.9", "vac-1").await;
        let other_vacancy = submit(&state, "203.0.113.9", "vac-2").await;
        let other_address = submit(&state, "198.51.100.4", "vac-1").await;

        assert_eq!(other_vacancy, (StatusCode::OK, false, None));
        assert_eq!(other_address, (StatusCode::OK, false, None));
    }

    #[tokio::test]
    async fn missing_vacancy_id_is_a_bad_request() {
        let state = in_memory_state();

        let (status, blocked, error) = submit(&state, "203.0.113.9", "  ").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!blocked);
        assert!(error.is_some());
    }
}
