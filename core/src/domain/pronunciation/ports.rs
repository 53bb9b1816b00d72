use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    pronunciation::value_objects::{AudioPayload, PronounceIngredientInput, SpeechInput},
};

/// A text-to-speech backend producing MP3.
pub trait SpeechEngine: Send + Sync {
    /// Whether the backend understands SSML prosody markup.
    fn supports_ssml(&self) -> bool;

    fn synthesize(
        &self,
        input: SpeechInput,
    ) -> impl Future<Output = Result<AudioPayload, CoreError>> + Send;
}

/// Turns an ingredient name into spoken audio.
///
/// Flagged ingredients (`is_concerned`) are spoken differently: an
/// interjection is appended and, where the backend allows, the rate slows.
pub trait PronunciationSynthesizer: Send + Sync {
    fn synthesize(
        &self,
        ingredient_name: String,
        is_concerned: bool,
    ) -> impl Future<Output = Result<AudioPayload, CoreError>> + Send;
}

/// Service trait for pronunciation. Failures are returned, not degraded.
pub trait PronunciationService: Send + Sync {
    fn pronounce_ingredient(
        &self,
        input: PronounceIngredientInput,
    ) -> impl Future<Output = Result<AudioPayload, CoreError>> + Send;
}
