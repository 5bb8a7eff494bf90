use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use jobboard_core::AppError;
use subtle::ConstantTimeEq;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn require_dispatch_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or_default();

    if !secrets_match(token, state.dispatch_shared_secret.as_str()) {
        return Err(AppError::Unauthorized("invalid dispatch credentials".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn secrets_match(provided: &str, expected: &str) -> bool {
    !provided.is_empty()
        && provided.len() == expected.len()
        && bool::from(provided.as_bytes().ct_eq(expected.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::secrets_match;

    #[test]
    fn secrets_must_match_exactly() {
        assert!(secrets_match("0123456789abcdef", "0123456789abcdef"));
        assert!(!secrets_match("0123456789abcdeF", "0123456789abcdef"));
        assert!(!secrets_match("0123456789abcde", "0123456789abcdef"));
        assert!(!secrets_match("", ""));
    }
}
