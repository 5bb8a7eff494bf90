use axum::Json;
use axum::extract::State;
use jobboard_application::DispatchResult;
use tracing::info;

use crate::dto::{OutboxDispatchResponse, OutboxDispatchResultResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn dispatch_outbox_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<OutboxDispatchResponse>> {
    let report = state.outbox_service.run_dispatch_cycle().await?;

    info!(
        processed = report.processed,
        sent = report.sent_count(),
        "outbox dispatch triggered over http"
    );

    Ok(Json(OutboxDispatchResponse {
        message: format!("processed {} outbox events", report.processed),
        results: report.results.iter().map(result_response).collect(),
    }))
}

fn result_response(result: &DispatchResult) -> OutboxDispatchResultResponse {
    OutboxDispatchResultResponse {
        id: result.event_id.to_string(),
        status: if result.outcome.is_sent() {
            "sent"
        } else {
            "error"
        },
        error: result.outcome.error().map(ToOwned::to_owned),
    }
}
