use axum::{
    Json, RequestExt,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use platewise_core::domain::authentication::{
    ports::AuthService, value_objects::AuthorizeRequestInput,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::http::server::app_state::AppState;

#[derive(Debug, Error, Deserialize, Serialize, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token not found")]
    TokenNotFound,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    code: String,
    message: String,
    status: u16,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let body = ErrorResponse {
            code: "E_UNAUTHORIZED".to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Requires a valid bearer token and attaches the caller's
/// [`Identity`](platewise_core::domain::authentication::value_objects::Identity)
/// to the request extensions.
pub async fn auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let TypedHeader(Authorization(bearer)) = req
        .extract_parts::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| AuthError::TokenNotFound)?;

    let output = state
        .service
        .authorize_request(AuthorizeRequestInput {
            token: bearer.token().to_string(),
        })
        .await
        .map_err(|e| {
            debug!(error = %e, "bearer token rejected");
            AuthError::InvalidToken
        })?;

    req.extensions_mut().insert(output.identity);
    Ok(next.run(req).await)
}
