use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

use crate::domain::{
    image::value_objects::CompressionSettings,
    pronunciation::value_objects::{PronunciationStrategy, SpeechProvider},
};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct PlatewiseConfig {
    pub llm: LLMConfig,
    pub food_data: FoodDataConfig,
    pub speech: SpeechConfig,
    pub image: CompressionSettings,
    pub auth: AuthConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Overrides the public endpoint, e.g. for a proxy.
    pub base_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct FoodDataConfig {
    /// Without a key every lookup is a logged no-op.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SpeechConfig {
    pub provider: SpeechProvider,
    pub strategy: PronunciationStrategy,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub voice: Option<String>,
    pub language_code: String,
    /// Overrides the provider's public endpoint.
    pub base_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}
