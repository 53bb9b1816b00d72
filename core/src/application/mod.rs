use std::sync::Arc;

use tracing::info;

use crate::{
    domain::{
        common::{PlatewiseConfig, entities::app_errors::CoreError, services::Service},
        pronunciation::{interjections::RandomInterjectionPicker, services::Pronouncer},
    },
    infrastructure::{
        authentication::JwtIdentityVerifier,
        food_data::FoodDataCentralClient,
        history::InMemoryUploadRepository,
        llm::GeminiLLMClient,
        speech::{SpeechBackend, SpeechEngineFactory},
    },
};

pub type PlatewisePronouncer = Pronouncer<GeminiLLMClient, SpeechBackend, RandomInterjectionPicker>;

pub type PlatewiseService = Service<
    GeminiLLMClient,
    FoodDataCentralClient,
    PlatewisePronouncer,
    InMemoryUploadRepository,
    JwtIdentityVerifier,
>;

/// Builds every client once from configuration.
pub fn create_service(config: PlatewiseConfig) -> Result<PlatewiseService, CoreError> {
    if config.llm.gemini_api_key.trim().is_empty() {
        return Err(CoreError::Invalid("GEMINI_API_KEY must be set".to_string()));
    }

    let llm_client = Arc::new(match config.llm.base_url {
        Some(base_url) => GeminiLLMClient::with_base_url(
            config.llm.gemini_api_key,
            config.llm.gemini_model.clone(),
            base_url,
        ),
        None => GeminiLLMClient::new(config.llm.gemini_api_key, config.llm.gemini_model.clone()),
    });
    let product_lookup = Arc::new(match config.food_data.base_url {
        Some(base_url) => FoodDataCentralClient::with_base_url(config.food_data.api_key, base_url),
        None => FoodDataCentralClient::new(config.food_data.api_key),
    });
    let speech_engine = Arc::new(SpeechEngineFactory::create(&config.speech)?);
    let synthesizer = Arc::new(Pronouncer::new(
        config.speech.strategy,
        llm_client.clone(),
        speech_engine,
        RandomInterjectionPicker,
    ));

    info!(
        model = %config.llm.gemini_model,
        speech_provider = ?config.speech.provider,
        pronunciation = ?config.speech.strategy,
        compression = config.image.enabled,
        max_dimension = config.image.max_dimension,
        quality = config.image.quality,
        "analysis service configured"
    );

    Ok(Service::new(
        llm_client,
        product_lookup,
        synthesizer,
        Arc::new(InMemoryUploadRepository::new()),
        Arc::new(JwtIdentityVerifier::new(&config.auth.jwt_secret)),
        config.image,
    ))
}
