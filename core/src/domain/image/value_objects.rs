use std::str::FromStr;

use crate::domain::common::entities::app_errors::CoreError;

pub const DEFAULT_MAX_DIMENSION: u32 = 1024;
pub const DEFAULT_QUALITY: u8 = 85;

/// Raw image bytes as submitted, plus the declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
        }
    }
}

/// How the larger edge is brought to `max_dimension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Always scale so the larger edge equals `max_dimension`, up or down.
    Always,
    /// Leave images that already fit untouched and only re-encode them.
    #[default]
    SkipIfWithinBounds,
}

impl FromStr for ResizePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(ResizePolicy::Always),
            "fit" | "skip" | "skip-if-within-bounds" => Ok(ResizePolicy::SkipIfWithinBounds),
            other => Err(CoreError::Invalid(format!("unknown resize policy: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSettings {
    /// When false the image is only validated and submitted as-is.
    pub enabled: bool,
    pub max_dimension: u32,
    /// Lossy quality, 1..=100.
    pub quality: u8,
    pub policy: ResizePolicy,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_QUALITY,
            policy: ResizePolicy::default(),
        }
    }
}

/// Output of the preprocessor, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub media_type: String,
    /// False when the original bytes were passed through.
    pub reencoded: bool,
}

impl CompressedImage {
    pub fn into_payload(self) -> ImagePayload {
        ImagePayload::new(self.bytes, self.media_type)
    }
}
