use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::domain::{
    common::entities::app_errors::CoreError,
    pronunciation::{
        ports::SpeechEngine,
        value_objects::{AudioPayload, SpeechInput},
    },
};

const GOOGLE_TTS_BASE_URL: &str = "https://texttospeech.googleapis.com/v1";
pub const DEFAULT_GOOGLE_VOICE: &str = "en-US-Neural2-F";

/// Google Cloud Text-to-Speech over REST. Understands SSML.
#[derive(Debug, Clone)]
pub struct GoogleTtsEngine {
    api_key: String,
    voice: String,
    language_code: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum SynthesisInput {
    Text(String),
    Ssml(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

impl GoogleTtsEngine {
    pub fn new(api_key: String, voice: Option<String>, language_code: String) -> Self {
        Self::with_base_url(api_key, voice, language_code, GOOGLE_TTS_BASE_URL.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        voice: Option<String>,
        language_code: String,
        base_url: String,
    ) -> Self {
        Self {
            api_key,
            voice: voice.unwrap_or_else(|| DEFAULT_GOOGLE_VOICE.to_string()),
            language_code,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn request(&self, input: SpeechInput) -> SynthesizeRequest {
        SynthesizeRequest {
            input: match input {
                SpeechInput::Text(text) => SynthesisInput::Text(text),
                SpeechInput::Ssml(ssml) => SynthesisInput::Ssml(ssml),
            },
            voice: VoiceSelection {
                language_code: self.language_code.clone(),
                name: self.voice.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        }
    }
}

fn decode_audio(response: SynthesizeResponse) -> Result<AudioPayload, CoreError> {
    let bytes = general_purpose::STANDARD
        .decode(response.audio_content)
        .map_err(|e| CoreError::SynthesisError(format!("invalid audio content: {e}")))?;

    AudioPayload::mp3(bytes)
}

impl SpeechEngine for GoogleTtsEngine {
    fn supports_ssml(&self) -> bool {
        true
    }

    #[instrument(skip_all, fields(voice = %self.voice))]
    async fn synthesize(&self, input: SpeechInput) -> Result<AudioPayload, CoreError> {
        let url = format!("{}/text:synthesize?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .post(&url)
            .json(&self.request(input))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Google TTS request failed: {}", e);
                CoreError::SynthesisError(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Google TTS error: {} - {}", status, body);
            return Err(CoreError::SynthesisError(format!("status {status}: {body}")));
        }

        let response: SynthesizeResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to parse Google TTS response: {}", e);
            CoreError::SynthesisError(format!("unreadable response: {}", e))
        })?;

        let audio = decode_audio(response)?;
        debug!(bytes = audio.bytes.len(), "Google TTS synthesis completed");
        Ok(audio)
    }
}
