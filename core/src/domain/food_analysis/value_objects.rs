use serde::Serialize;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct AnalyzeIngredientInput {
    pub ingredient_name: String,
}

/// Token counters reported by the inference backend, when it reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Unprocessed model text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

impl RawModelResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    pub fn log_usage(&self, task: &str) {
        match self.usage {
            Some(usage) => tracing::info!(
                task,
                prompt_tokens = usage.prompt_tokens,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total_tokens,
                "inference token usage"
            ),
            None => tracing::debug!(task, "usage metadata not available"),
        }
    }
}

/// Result of decoding cleaned model text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    /// The text did not decode; it is kept as-is for the caller.
    RawFallback(String),
}

/// Why an analysis produced no content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidImage,
    Inference,
    Internal,
}

impl From<&CoreError> for FailureKind {
    fn from(error: &CoreError) -> Self {
        match error {
            CoreError::DecodeError(_) => FailureKind::InvalidImage,
            CoreError::InferenceError(_) => FailureKind::Inference,
            _ => FailureKind::Internal,
        }
    }
}

/// What an analysis hands back to its caller.
///
/// Serializes to the record itself, to `{"raw_response": ...}` or to
/// `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome<T> {
    Parsed(T),
    RawFallback {
        raw_response: String,
    },
    Failed {
        error: String,
        #[serde(skip)]
        kind: FailureKind,
    },
}

impl<T> AnalysisOutcome<T> {
    pub fn failed(error: CoreError) -> Self {
        AnalysisOutcome::Failed {
            kind: FailureKind::from(&error),
            error: error.to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed { .. })
    }

    pub fn parsed(&self) -> Option<&T> {
        match self {
            AnalysisOutcome::Parsed(record) => Some(record),
            _ => None,
        }
    }
}

impl<T> From<ParseOutcome<T>> for AnalysisOutcome<T> {
    fn from(outcome: ParseOutcome<T>) -> Self {
        match outcome {
            ParseOutcome::Parsed(record) => AnalysisOutcome::Parsed(record),
            ParseOutcome::RawFallback(raw_response) => AnalysisOutcome::RawFallback { raw_response },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization_shapes() {
        let fallback: AnalysisOutcome<serde_json::Value> = AnalysisOutcome::RawFallback {
            raw_response: "not json".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&fallback).unwrap(),
            serde_json::json!({ "raw_response": "not json" })
        );

        let failed: AnalysisOutcome<serde_json::Value> =
            AnalysisOutcome::failed(CoreError::InferenceError("timeout".to_string()));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({ "error": "Inference failed: timeout" })
        );
    }

    #[test]
    fn test_failure_kind_follows_error() {
        let AnalysisOutcome::<()>::Failed { kind, .. } =
            AnalysisOutcome::failed(CoreError::DecodeError("bad".to_string()))
        else {
            panic!("expected failure");
        };
        assert_eq!(kind, FailureKind::InvalidImage);
    }
}
