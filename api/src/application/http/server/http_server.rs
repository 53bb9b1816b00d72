use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
    },
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use platewise_core::{application::create_service, domain::common::PlatewiseConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    application::http::{
        food_analysis::router::food_analysis_routes,
        health::health_routes,
        history::router::history_routes,
        pronunciation::router::pronunciation_routes,
        server::{app_state::AppState, openapi::openapi},
    },
    args::Args,
};

pub fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = PlatewiseConfig::from(args.as_ref().clone());
    let service = create_service(config).context("failed to build the analysis service")?;

    Ok(AppState::new(args, service))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid origin '{origin}'"))
        })
        .collect::<Result<Vec<HeaderValue>, _>>()?;

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true);

    let root_path = state.args.server.root_path.clone();

    let router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi(&root_path),
        ))
        .merge(health_routes(&root_path))
        .merge(food_analysis_routes(state.clone()))
        .merge(pronunciation_routes(state.clone()))
        .merge(history_routes(state.clone()))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);
    Ok(router)
}

/// Adds the Prometheus layer and the `/metrics` route. The metrics recorder
/// is process-global, so this is called once, from `main`.
pub fn with_metrics(router: Router, root_path: &str) -> Router {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    router
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(prometheus_layer)
}
