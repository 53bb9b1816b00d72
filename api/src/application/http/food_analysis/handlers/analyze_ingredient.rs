use axum::extract::State;
use platewise_core::domain::food_analysis::{
    entities::IngredientAnalysisRecord, ports::FoodAnalysisService,
    value_objects::AnalyzeIngredientInput,
};

use crate::application::http::{
    food_analysis::validators::AnalyzeIngredientRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::OutcomeResponse,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze-ingredient",
    tag = "food-analysis",
    summary = "Describe a single ingredient",
    responses(
        (status = 200, body = IngredientAnalysisRecord),
        (status = 400, body = ApiErrorResponse),
        (status = 502, description = "The inference service failed")
    ),
    request_body = AnalyzeIngredientRequest
)]
pub async fn analyze_ingredient(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeIngredientRequest>,
) -> Result<OutcomeResponse<IngredientAnalysisRecord>, ApiError> {
    let outcome = state
        .service
        .analyze_ingredient(AnalyzeIngredientInput {
            ingredient_name: payload.ingredient_name.trim().to_string(),
        })
        .await;

    Ok(OutcomeResponse(outcome))
}
