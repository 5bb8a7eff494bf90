use axum::Json;
use axum::extract::{Path, State};

use crate::dto::VacancyViewResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn record_vacancy_view_handler(
    State(state): State<AppState>,
    Path(vacancy_id): Path<String>,
) -> ApiResult<Json<VacancyViewResponse>> {
    let count = state
        .vacancy_view_service
        .record_view(vacancy_id.as_str())
        .await?;

    Ok(Json(VacancyViewResponse {
        vacancy_id: count.vacancy_id.as_str().to_owned(),
        view_count: count.view_count,
    }))
}
