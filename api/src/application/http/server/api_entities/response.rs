use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use platewise_core::domain::food_analysis::value_objects::{AnalysisOutcome, FailureKind};
use serde::Serialize;

#[derive(Debug)]
pub enum Response<T: Serialize> {
    OK(T),
    Created(T),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        match self {
            Response::OK(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Created(data) => (StatusCode::CREATED, Json(data)).into_response(),
        }
    }
}

/// An analysis outcome as an HTTP response. The body is the outcome itself;
/// only failed outcomes change the status.
#[derive(Debug)]
pub struct OutcomeResponse<T>(pub AnalysisOutcome<T>);

impl<T: Serialize> IntoResponse for OutcomeResponse<T> {
    fn into_response(self) -> AxumResponse {
        let status = match &self.0 {
            AnalysisOutcome::Failed { kind, .. } => match kind {
                FailureKind::InvalidImage => StatusCode::UNPROCESSABLE_ENTITY,
                FailureKind::Inference => StatusCode::BAD_GATEWAY,
                FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::OK,
        };

        (status, Json(self.0)).into_response()
    }
}
