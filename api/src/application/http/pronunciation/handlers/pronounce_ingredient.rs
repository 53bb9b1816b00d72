use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use platewise_core::domain::pronunciation::{
    ports::PronunciationService,
    value_objects::{AudioPayload, PronounceIngredientInput},
};

use crate::application::http::{
    pronunciation::validators::PronounceIngredientRequest,
    server::{
        api_entities::api_error::{ApiError, ApiErrorResponse, ValidateJson},
        app_state::AppState,
    },
};

/// MP3 bytes with their content type.
pub struct AudioResponse(pub AudioPayload);

impl IntoResponse for AudioResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.0.content_type())], self.0.bytes).into_response()
    }
}

#[utoipa::path(
    post,
    path = "/pronounce-ingredient",
    tag = "pronunciation",
    summary = "Speak an ingredient name",
    description = "Flagged ingredients are spoken slower where the voice allows it and followed by an interjection.",
    responses(
        (status = 200, description = "MP3 audio", content_type = "audio/mpeg", body = Vec<u8>),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
    request_body = PronounceIngredientRequest
)]
pub async fn pronounce_ingredient(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<PronounceIngredientRequest>,
) -> Result<AudioResponse, ApiError> {
    let is_concerned = payload.is_concerned();

    let audio = state
        .service
        .pronounce_ingredient(PronounceIngredientInput {
            ingredient_name: payload.ingredient_name,
            is_concerned,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(AudioResponse(audio))
}
