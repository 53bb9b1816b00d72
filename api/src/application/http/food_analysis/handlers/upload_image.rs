use axum::{
    Extension,
    extract::{Multipart, State},
};
use platewise_core::domain::{
    authentication::value_objects::Identity,
    food_analysis::{
        entities::FoodAnalysisRecord, ports::FoodAnalysisService, value_objects::AnalyzeImageInput,
    },
    history::{ports::HistoryService, value_objects::SaveAnalysisInput},
};
use tracing::warn;

use crate::application::http::{
    food_analysis::validators::UploadImageForm,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::OutcomeResponse,
        },
        app_state::AppState,
    },
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB
const DEFAULT_FILENAME: &str = "upload";

#[utoipa::path(
    post,
    path = "/upload",
    tag = "food-analysis",
    summary = "Analyze a food photo",
    description = "Returns the analysis record, `{\"raw_response\": ...}` when the model reply could not be decoded, or `{\"error\": ...}`. Successful analyses are added to the caller's history.",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = FoodAnalysisRecord),
        (status = 400, body = ApiErrorResponse),
        (status = 422, description = "The image could not be decoded"),
        (status = 502, description = "The inference service failed")
    ),
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Result<OutcomeResponse<FoodAnalysisRecord>, ApiError> {
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut consumed = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or(DEFAULT_FILENAME)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                image = Some((filename, data.to_vec()));
            }
            "consumed" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read consumed: {}", e))
                })?;
                consumed = value.trim().parse().map_err(|_| {
                    ApiError::BadRequest("consumed must be true or false".to_string())
                })?;
            }
            _ => {}
        }
    }

    let (filename, image_data) =
        image.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;
    if image_data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    let outcome = state
        .service
        .analyze_image(AnalyzeImageInput { image_data })
        .await;

    if !outcome.is_failed() {
        match serde_json::to_value(&outcome) {
            Ok(analysis) => {
                if let Err(e) = state
                    .service
                    .save_analysis(
                        identity,
                        SaveAnalysisInput {
                            filename,
                            analysis,
                            consumed,
                        },
                    )
                    .await
                {
                    warn!(error = %e, "failed to record analysis in history");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize analysis for history"),
        }
    }

    Ok(OutcomeResponse(outcome))
}
