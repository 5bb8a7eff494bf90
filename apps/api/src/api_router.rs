use axum::Router;
use axum::routing::{get, post};
use jobboard_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;
mod internal;

use cors::build_cors_layer;
use internal::build_internal_routes;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = build_cors_layer(frontend_url)?;
    let internal_routes = build_internal_routes(app_state.clone());

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/applications/rate-limit",
            post(handlers::applications::application_rate_limit_handler),
        )
        .route(
            "/api/vacancies/{vacancy_id}/views",
            post(handlers::vacancies::record_vacancy_view_handler),
        )
        .merge(internal_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::build_router;
    use crate::handlers::test_support::{TEST_DISPATCH_SECRET, in_memory_state};

    fn dispatch_request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/internal/outbox/dispatch");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        match builder.body(Body::empty()) {
            Ok(request) => request,
            Err(error) => panic!("failed to build request: {error}"),
        }
    }

    async fn dispatch_status(authorization: Option<&str>) -> StatusCode {
        let router = match build_router(in_memory_state(), "http://localhost:3000") {
            Ok(router) => router,
            Err(error) => panic!("failed to build router: {error}"),
        };

        match router.oneshot(dispatch_request(authorization)).await {
            Ok(response) => response.status(),
            Err(error) => match error {},
        }
    }

    #[tokio::test]
    async fn dispatch_requires_shared_secret() {
        assert_eq!(dispatch_status(None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            dispatch_status(Some("Bearer wrong-secret-value!")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn dispatch_accepts_shared_secret() {
        let authorization = format!("Bearer {TEST_DISPATCH_SECRET}");

        assert_eq!(
            dispatch_status(Some(authorization.as_str())).await,
            StatusCode::OK
        );
    }
}
