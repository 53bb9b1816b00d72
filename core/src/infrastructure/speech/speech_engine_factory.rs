use crate::domain::{
    common::{SpeechConfig, entities::app_errors::CoreError},
    pronunciation::{
        ports::SpeechEngine,
        value_objects::{AudioPayload, SpeechInput, SpeechProvider},
    },
};

use super::{google_tts_engine::GoogleTtsEngine, openai_tts_engine::OpenAiTtsEngine};

/// The configured text-to-speech backend.
#[derive(Debug, Clone)]
pub enum SpeechBackend {
    Google(GoogleTtsEngine),
    OpenAi(OpenAiTtsEngine),
}

impl SpeechEngine for SpeechBackend {
    fn supports_ssml(&self) -> bool {
        match self {
            SpeechBackend::Google(engine) => engine.supports_ssml(),
            SpeechBackend::OpenAi(engine) => engine.supports_ssml(),
        }
    }

    async fn synthesize(&self, input: SpeechInput) -> Result<AudioPayload, CoreError> {
        match self {
            SpeechBackend::Google(engine) => engine.synthesize(input).await,
            SpeechBackend::OpenAi(engine) => engine.synthesize(input).await,
        }
    }
}

pub struct SpeechEngineFactory;

impl SpeechEngineFactory {
    pub fn create(config: &SpeechConfig) -> Result<SpeechBackend, CoreError> {
        match config.provider {
            SpeechProvider::Google => {
                let key = config.google_api_key.clone().ok_or_else(|| {
                    CoreError::Invalid("GOOGLE_TTS_API_KEY required for Google TTS".to_string())
                })?;
                let engine = match &config.base_url {
                    Some(base_url) => GoogleTtsEngine::with_base_url(
                        key,
                        config.voice.clone(),
                        config.language_code.clone(),
                        base_url.clone(),
                    ),
                    None => GoogleTtsEngine::new(
                        key,
                        config.voice.clone(),
                        config.language_code.clone(),
                    ),
                };
                Ok(SpeechBackend::Google(engine))
            }
            SpeechProvider::OpenAi => {
                let key = config.openai_api_key.clone().ok_or_else(|| {
                    CoreError::Invalid("OPENAI_API_KEY required for OpenAI TTS".to_string())
                })?;
                Ok(SpeechBackend::OpenAi(OpenAiTtsEngine::new(
                    key,
                    config.voice.clone(),
                    config.base_url.clone(),
                )))
            }
        }
    }
}
