use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The submitted bytes could not be decoded as a raster image.
    #[error("Unreadable image: {0}")]
    DecodeError(String),

    /// Transport or service failure while calling the inference backend.
    #[error("Inference failed: {0}")]
    InferenceError(String),

    /// Model output that could not be decoded. Never leaves the parser.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Speech synthesis failed: {0}")]
    SynthesisError(String),

    /// Product lookup failure. Logged, never surfaced.
    #[error("Enrichment failed: {0}")]
    EnrichmentFailure(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    Invalid(String),
}
