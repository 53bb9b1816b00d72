use tracing::{error, info, instrument};

use crate::domain::{
    authentication::ports::IdentityVerifier,
    common::{entities::app_errors::CoreError, services::Service},
    enrichment::{ports::ProductLookup, services::maybe_enrich},
    food_analysis::{
        entities::{FoodAnalysisRecord, IngredientAnalysisRecord},
        parser::{clean, parse},
        ports::{FoodAnalysisService, LLMClient},
        prompts::{PromptKind, build_food_prompt, build_ingredient_prompt},
        value_objects::{AnalysisOutcome, AnalyzeImageInput, AnalyzeIngredientInput},
    },
    history::ports::UploadRepository,
    image::{
        services::compress,
        value_objects::{CompressedImage, CompressionSettings},
    },
    pronunciation::ports::PronunciationSynthesizer,
};

impl<LLM, PL, SY, UR, IV> Service<LLM, PL, SY, UR, IV>
where
    LLM: LLMClient,
    PL: ProductLookup + 'static,
    SY: PronunciationSynthesizer,
    UR: UploadRepository,
    IV: IdentityVerifier,
{
    async fn run_image_analysis(
        &self,
        image_data: Vec<u8>,
    ) -> Result<AnalysisOutcome<FoodAnalysisRecord>, CoreError> {
        let image = preprocess(image_data, self.compression).await?;

        let response = self
            .llm_client
            .generate_with_image(build_food_prompt(), image.into_payload())
            .await?;
        response.log_usage(PromptKind::FoodImage.as_str());

        let outcome = AnalysisOutcome::from(parse::<FoodAnalysisRecord>(&clean(&response.text)));

        if let Some(record) = outcome.parsed() {
            // Detached: the response never waits on the product lookup.
            let _ = maybe_enrich(self.product_lookup.clone(), record);
        }

        Ok(outcome)
    }

    async fn run_ingredient_analysis(
        &self,
        ingredient_name: &str,
    ) -> Result<AnalysisOutcome<IngredientAnalysisRecord>, CoreError> {
        let response = self
            .llm_client
            .generate_with_text(build_ingredient_prompt(ingredient_name))
            .await?;
        response.log_usage(PromptKind::Ingredient.as_str());

        Ok(parse::<IngredientAnalysisRecord>(&clean(&response.text)).into())
    }
}

/// Decoding and re-encoding are CPU bound, so they run off the async workers.
async fn preprocess(
    image_data: Vec<u8>,
    settings: CompressionSettings,
) -> Result<CompressedImage, CoreError> {
    tokio::task::spawn_blocking(move || compress(&image_data, &settings))
        .await
        .map_err(|e| CoreError::DecodeError(format!("image processing task failed: {e}")))?
}

impl<LLM, PL, SY, UR, IV> FoodAnalysisService for Service<LLM, PL, SY, UR, IV>
where
    LLM: LLMClient,
    PL: ProductLookup + 'static,
    SY: PronunciationSynthesizer,
    UR: UploadRepository,
    IV: IdentityVerifier,
{
    #[instrument(skip_all, fields(bytes = input.image_data.len()))]
    async fn analyze_image(&self, input: AnalyzeImageInput) -> AnalysisOutcome<FoodAnalysisRecord> {
        match self.run_image_analysis(input.image_data).await {
            Ok(outcome) => {
                info!(parsed = outcome.parsed().is_some(), "image analysis finished");
                outcome
            }
            Err(e) => {
                error!(error = %e, "image analysis failed");
                AnalysisOutcome::failed(e)
            }
        }
    }

    #[instrument(skip_all, fields(ingredient = %input.ingredient_name))]
    async fn analyze_ingredient(
        &self,
        input: AnalyzeIngredientInput,
    ) -> AnalysisOutcome<IngredientAnalysisRecord> {
        match self.run_ingredient_analysis(&input.ingredient_name).await {
            Ok(outcome) => {
                info!(parsed = outcome.parsed().is_some(), "ingredient analysis finished");
                outcome
            }
            Err(e) => {
                error!(error = %e, "ingredient analysis failed");
                AnalysisOutcome::failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};

    use super::*;
    use crate::domain::{
        enrichment::entities::ProductMatch,
        food_analysis::{entities::UNKNOWN, value_objects::FailureKind},
        test_support::{FakeLLMClient, FakeProductLookup, Fakes},
    };

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn product() -> ProductMatch {
        ProductMatch {
            fdc_id: Some(2345678),
            description: "Granola bar".to_string(),
            product_url: None,
            nutrients: Vec::new(),
        }
    }

    /// Lets detached tasks run to completion on the current-thread runtime.
    async fn drain_background_tasks() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_analyze_image_parses_fenced_record() {
        let fakes = Fakes::new(FakeLLMClient::replying(
            "```json\n{\"food_name\":\"Apple\"}\n```",
        ));

        let outcome = fakes
            .service()
            .analyze_image(AnalyzeImageInput {
                image_data: png_bytes(2000, 1000),
            })
            .await;

        let record = outcome.parsed().expect("parsed record");
        assert_eq!(record.food_name, "Apple");
        assert_eq!(record.nutrition_data.calories, UNKNOWN);

        let images = fakes.llm.images.lock().unwrap();
        assert_eq!(images[0].media_type, "image/jpeg");
        let submitted = image::load_from_memory(&images[0].bytes).unwrap();
        assert_eq!((submitted.width(), submitted.height()), (1024, 512));
    }

    #[tokio::test]
    async fn test_analyze_image_keeps_raw_text_on_malformed_output() {
        let fakes = Fakes::new(FakeLLMClient::replying("not json at all"));

        let outcome = fakes
            .service()
            .analyze_image(AnalyzeImageInput {
                image_data: png_bytes(10, 10),
            })
            .await;

        assert_eq!(
            outcome,
            AnalysisOutcome::RawFallback {
                raw_response: "not json at all".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_undecodable_image_is_an_error_result_without_inference() {
        let fakes = Fakes::default();

        let outcome = fakes
            .service()
            .analyze_image(AnalyzeImageInput {
                image_data: b"definitely not an image".to_vec(),
            })
            .await;

        assert!(matches!(
            outcome,
            AnalysisOutcome::Failed { kind: FailureKind::InvalidImage, .. }
        ));
        assert_eq!(fakes.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_inference_failure_is_an_error_result() {
        let fakes = Fakes::new(FakeLLMClient::failing(CoreError::InferenceError(
            "status 503".to_string(),
        )));

        let outcome = fakes
            .service()
            .analyze_image(AnalyzeImageInput {
                image_data: png_bytes(10, 10),
            })
            .await;

        assert_eq!(
            outcome,
            AnalysisOutcome::Failed {
                error: "Inference failed: status 503".to_string(),
                kind: FailureKind::Inference,
            }
        );
    }

    #[tokio::test]
    async fn test_confident_upc_triggers_background_lookup() {
        let fakes = Fakes::new(FakeLLMClient::replying(
            r#"{"food_name":"Granola bar","upc_code":"012345678905","upc_confidence":0.9}"#,
        ))
        .with_lookup(FakeProductLookup::returning(Ok(Some(product()))));

        let outcome = fakes
            .service()
            .analyze_image(AnalyzeImageInput {
                image_data: png_bytes(10, 10),
            })
            .await;
        drain_background_tasks().await;

        assert_eq!(outcome.parsed().unwrap().food_name, "Granola bar");
        assert_eq!(
            *fakes.lookup.calls.lock().unwrap(),
            vec!["012345678905".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unconfident_upc_skips_lookup() {
        let fakes = Fakes::new(FakeLLMClient::replying(
            r#"{"food_name":"Granola bar","upc_code":"012345678905","upc_confidence":0.5}"#,
        ));

        fakes
            .service()
            .analyze_image(AnalyzeImageInput {
                image_data: png_bytes(10, 10),
            })
            .await;
        drain_background_tasks().await;

        assert_eq!(fakes.lookup.call_count(), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_does_not_change_outcome() {
        let fakes = Fakes::new(FakeLLMClient::replying(
            r#"{"food_name":"Granola bar","upc_code":"012345678905","upc_confidence":0.95}"#,
        ))
        .with_lookup(FakeProductLookup::returning(Err(
            CoreError::EnrichmentFailure("status 500".to_string()),
        )));

        let outcome = fakes
            .service()
            .analyze_image(AnalyzeImageInput {
                image_data: png_bytes(10, 10),
            })
            .await;
        drain_background_tasks().await;

        assert_eq!(outcome.parsed().unwrap().food_name, "Granola bar");
        assert_eq!(fakes.lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_ingredient_uses_text_prompt() {
        let fakes = Fakes::new(FakeLLMClient::replying(
            "```json\n{\"name\":\"Carrageenan\",\"safety_status\":\"⚠️ Caution: may irritate the gut\"}\n```",
        ));

        let outcome = fakes
            .service()
            .analyze_ingredient(AnalyzeIngredientInput {
                ingredient_name: "Carrageenan".to_string(),
            })
            .await;

        let record = outcome.parsed().expect("parsed record");
        assert_eq!(record.name, "Carrageenan");
        assert_eq!(record.purpose, UNKNOWN);
        assert!(fakes.llm.images.lock().unwrap().is_empty());
        assert!(fakes.llm.prompts.lock().unwrap()[0].contains("\"Carrageenan\""));
    }

    #[tokio::test]
    async fn test_analyze_ingredient_failure_is_an_error_result() {
        let fakes = Fakes::new(FakeLLMClient::failing(CoreError::InferenceError(
            "timeout".to_string(),
        )));

        let outcome = fakes
            .service()
            .analyze_ingredient(AnalyzeIngredientInput {
                ingredient_name: "Guar gum".to_string(),
            })
            .await;

        assert!(outcome.is_failed());
    }
}
