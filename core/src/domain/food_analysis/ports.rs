use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{FoodAnalysisRecord, IngredientAnalysisRecord},
        value_objects::{
            AnalysisOutcome, AnalyzeImageInput, AnalyzeIngredientInput, RawModelResponse,
        },
    },
    image::value_objects::ImagePayload,
};

/// LLM Client trait for calling AI models. One round trip per call, no retry.
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: ImagePayload,
    ) -> impl Future<Output = Result<RawModelResponse, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
    ) -> impl Future<Output = Result<RawModelResponse, CoreError>> + Send;
}

/// Service trait for the analysis pipeline.
///
/// Both operations are error boundaries: failures come back as
/// [`AnalysisOutcome::Failed`], never as `Err`.
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_image(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = AnalysisOutcome<FoodAnalysisRecord>> + Send;

    fn analyze_ingredient(
        &self,
        input: AnalyzeIngredientInput,
    ) -> impl Future<Output = AnalysisOutcome<IngredientAnalysisRecord>> + Send;
}
