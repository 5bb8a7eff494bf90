use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: HealthDependencyStatus,
}

/// One runtime dependency health status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-dependency-status.ts"
)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}

/// Incoming payload for the application rate limit check.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/application-rate-limit-request.ts"
)]
pub struct ApplicationRateLimitRequest {
    #[serde(default)]
    pub vacancy_id: String,
    #[ts(optional)]
    pub user_agent: Option<String>,
    #[ts(optional)]
    pub session_id: Option<String>,
}

/// Rate limit decision. `error` is present only when the check itself failed.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/application-rate-limit-response.ts"
)]
pub struct ApplicationRateLimitResponse {
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

/// Updated view counter of a vacancy.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/vacancy-view-response.ts"
)]
pub struct VacancyViewResponse {
    pub vacancy_id: String,
    #[ts(type = "number")]
    pub view_count: i64,
}

/// Summary of one outbox dispatch cycle.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/outbox-dispatch-response.ts"
)]
pub struct OutboxDispatchResponse {
    pub message: String,
    pub results: Vec<OutboxDispatchResultResponse>,
}

/// Per-event dispatch result. `status` is `sent` or `error`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/outbox-dispatch-result-response.ts"
)]
pub struct OutboxDispatchResultResponse {
    pub id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}
