use std::str::FromStr;

use crate::domain::common::entities::app_errors::CoreError;

pub const MP3_CONTENT_TYPE: &str = "audio/mpeg";

/// Encoded speech, always MP3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    pub bytes: Vec<u8>,
}

impl AudioPayload {
    /// Wraps backend output, refusing anything that does not start like an
    /// MP3 stream (an ID3v2 tag or an MPEG audio frame sync).
    pub fn mp3(bytes: Vec<u8>) -> Result<Self, CoreError> {
        if !looks_like_mp3(&bytes) {
            return Err(CoreError::SynthesisError(format!(
                "backend returned {} bytes that are not MP3 audio",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    pub fn content_type(&self) -> &'static str {
        MP3_CONTENT_TYPE
    }
}

fn looks_like_mp3(bytes: &[u8]) -> bool {
    match bytes {
        [b'I', b'D', b'3', ..] => true,
        [0xFF, second, ..] => second & 0xE0 == 0xE0,
        _ => false,
    }
}

/// What a speech backend is asked to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechInput {
    Text(String),
    /// A complete `<speak>` document.
    Ssml(String),
}

impl SpeechInput {
    pub fn as_str(&self) -> &str {
        match self {
            SpeechInput::Text(text) | SpeechInput::Ssml(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechProvider {
    #[default]
    Google,
    OpenAi,
}

impl FromStr for SpeechProvider {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(SpeechProvider::Google),
            "openai" => Ok(SpeechProvider::OpenAi),
            other => Err(CoreError::Invalid(format!("unknown speech provider: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PronunciationStrategy {
    /// Speak the name as written.
    #[default]
    Direct,
    /// Ask the model for a phonetic respelling first, then speak that.
    Phonetic,
}

impl FromStr for PronunciationStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(PronunciationStrategy::Direct),
            "phonetic" => Ok(PronunciationStrategy::Phonetic),
            other => Err(CoreError::Invalid(format!(
                "unknown pronunciation strategy: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PronounceIngredientInput {
    pub ingredient_name: String,
    pub is_concerned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mp3_accepts_id3_and_frame_sync() {
        assert!(AudioPayload::mp3(b"ID3\x04\x00\x00".to_vec()).is_ok());
        assert!(AudioPayload::mp3(vec![0xFF, 0xFB, 0x90, 0x64]).is_ok());
    }

    #[test]
    fn test_mp3_rejects_other_payloads() {
        for bytes in [vec![], b"RIFF....WAVE".to_vec(), b"{\"error\":1}".to_vec(), vec![0xFF, 0x00]] {
            assert!(matches!(
                AudioPayload::mp3(bytes),
                Err(CoreError::SynthesisError(_))
            ));
        }
    }

    #[test]
    fn test_provider_and_strategy_from_str() {
        assert_eq!("OpenAI".parse::<SpeechProvider>().unwrap(), SpeechProvider::OpenAi);
        assert_eq!(
            "phonetic".parse::<PronunciationStrategy>().unwrap(),
            PronunciationStrategy::Phonetic
        );
        assert!("espeak".parse::<SpeechProvider>().is_err());
    }
}
