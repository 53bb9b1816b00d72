use axum::{
    Extension,
    extract::{Query, State},
};
use platewise_core::domain::{
    authentication::value_objects::Identity,
    history::{
        entities::UploadRecord,
        ports::HistoryService,
        value_objects::{GetHistoryInput, HistoryPeriod},
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    history::validators::GetHistoryParams,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GetHistoryResponse {
    pub data: Vec<UploadRecord>,
}

#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    summary = "List the caller's analyses, newest first",
    params(GetHistoryParams),
    responses(
        (status = 200, body = GetHistoryResponse),
        (status = 400, body = ApiErrorResponse)
    ),
)]
pub async fn get_history(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<GetHistoryParams>,
) -> Result<Response<GetHistoryResponse>, ApiError> {
    let period = params
        .period
        .as_deref()
        .map(str::parse::<HistoryPeriod>)
        .transpose()
        .map_err(ApiError::from)?
        .unwrap_or_default();

    let records = state
        .service
        .get_history(
            identity,
            GetHistoryInput {
                period,
                consumed: params.consumed,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetHistoryResponse { data: records }))
}
