use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    get_history::{__path_get_history, get_history},
    save_analysis::{__path_save_analysis, save_analysis},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(save_analysis, get_history))]
pub struct HistoryApiDoc;

pub fn history_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/save-analysis", state.args.server.root_path),
            post(save_analysis),
        )
        .route(
            &format!("{}/history", state.args.server.root_path),
            get(get_history),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
