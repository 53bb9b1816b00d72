use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::app_state::AppState;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = HealthResponse)
    ),
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(paths(health))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{}/health", root_path), get(health))
}
