use utoipa::OpenApi;

use crate::application::http::{
    food_analysis::router::FoodAnalysisApiDoc, health::HealthApiDoc,
    history::router::HistoryApiDoc, pronunciation::router::PronunciationApiDoc,
};

#[derive(OpenApi)]
#[openapi(info(
    title = "Platewise API",
    description = "Food photo analysis, ingredient lookups and pronunciation audio"
))]
pub struct ApiDoc;

/// The merged document, with every path under `root_path`.
pub fn openapi(root_path: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi()
        .merge_from(HealthApiDoc::openapi())
        .merge_from(FoodAnalysisApiDoc::openapi())
        .merge_from(PronunciationApiDoc::openapi())
        .merge_from(HistoryApiDoc::openapi());

    openapi.paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{root_path}{path}"), item))
        .collect();
    openapi
}
