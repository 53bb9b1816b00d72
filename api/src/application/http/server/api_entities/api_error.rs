use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use platewise_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    UnProcessableEntity(String),
    #[error("{0}")]
    BadGateway(String),
    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "E_UNAUTHORIZED"),
            ApiError::UnProcessableEntity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E_UNPROCESSABLE_ENTITY")
            }
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "E_BAD_GATEWAY"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Invalid(_) => ApiError::BadRequest(error.to_string()),
            CoreError::Unauthorized => ApiError::Unauthorized(error.to_string()),
            CoreError::DecodeError(_) => ApiError::UnProcessableEntity(error.to_string()),
            CoreError::InferenceError(_)
            | CoreError::SynthesisError(_)
            | CoreError::EnrichmentFailure(_) => ApiError::BadGateway(error.to_string()),
            CoreError::MalformedOutput(_) | CoreError::StorageError(_) => {
                tracing::error!("internal error: {}", error);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ApiErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that also runs `validator` rules.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}
