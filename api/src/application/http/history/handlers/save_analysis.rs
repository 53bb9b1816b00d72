use axum::{Extension, extract::State};
use platewise_core::domain::{
    authentication::value_objects::Identity,
    history::{entities::UploadRecord, ports::HistoryService, value_objects::SaveAnalysisInput},
};

use crate::application::http::{
    history::validators::SaveAnalysisRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/save-analysis",
    tag = "history",
    summary = "Keep an analysis in the caller's history",
    responses(
        (status = 201, body = UploadRecord),
        (status = 400, body = ApiErrorResponse)
    ),
    request_body = SaveAnalysisRequest
)]
pub async fn save_analysis(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidateJson(payload): ValidateJson<SaveAnalysisRequest>,
) -> Result<Response<UploadRecord>, ApiError> {
    let record = state
        .service
        .save_analysis(
            identity,
            SaveAnalysisInput {
                filename: payload.filename,
                analysis: payload.analysis,
                consumed: payload.consumed,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(record))
}
