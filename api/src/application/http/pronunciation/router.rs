use axum::{Router, middleware, routing::post};
use utoipa::OpenApi;

use super::handlers::pronounce_ingredient::{__path_pronounce_ingredient, pronounce_ingredient};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(pronounce_ingredient))]
pub struct PronunciationApiDoc;

pub fn pronunciation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/pronounce-ingredient", state.args.server.root_path),
            post(pronounce_ingredient),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
