use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    analyze_ingredient::{__path_analyze_ingredient, analyze_ingredient},
    upload_image::{__path_upload_image, MAX_IMAGE_SIZE, upload_image},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(upload_image, analyze_ingredient))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/upload", state.args.server.root_path),
            // Headroom over the image cap so oversize files reach the handler's check.
            post(upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .route(
            &format!("{}/analyze-ingredient", state.args.server.root_path),
            post(analyze_ingredient),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
