use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::domain::{
    common::entities::app_errors::CoreError,
    pronunciation::{
        ports::SpeechEngine,
        value_objects::{AudioPayload, SpeechInput},
    },
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_TTS_MODEL: &str = "tts-1";
pub const DEFAULT_OPENAI_VOICE: &str = "alloy";

/// OpenAI `audio/speech`. Plain text only.
#[derive(Debug, Clone)]
pub struct OpenAiTtsEngine {
    api_key: String,
    voice: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

impl OpenAiTtsEngine {
    pub fn new(api_key: String, voice: Option<String>, base_url: Option<String>) -> Self {
        Self {
            api_key,
            voice: voice.unwrap_or_else(|| DEFAULT_OPENAI_VOICE.to_string()),
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
            client: Client::new(),
        }
    }
}

impl SpeechEngine for OpenAiTtsEngine {
    fn supports_ssml(&self) -> bool {
        false
    }

    #[instrument(skip_all, fields(voice = %self.voice))]
    async fn synthesize(&self, input: SpeechInput) -> Result<AudioPayload, CoreError> {
        if let SpeechInput::Ssml(_) = input {
            return Err(CoreError::SynthesisError(
                "OpenAI speech does not accept SSML".to_string(),
            ));
        }

        let url = format!("{}/audio/speech", self.base_url);
        let request = SpeechRequest {
            model: OPENAI_TTS_MODEL,
            input: input.as_str(),
            voice: &self.voice,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("OpenAI speech request failed: {}", e);
                CoreError::SynthesisError(format!("request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            error!("OpenAI speech error: {} - {}", status, body);
            return Err(CoreError::SynthesisError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoreError::SynthesisError(format!("body: {}", e)))?;

        debug!(bytes = bytes.len(), "OpenAI speech synthesis completed");
        AudioPayload::mp3(bytes.to_vec())
    }
}
