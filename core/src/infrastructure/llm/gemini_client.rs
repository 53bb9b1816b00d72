use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        ports::LLMClient,
        value_objects::{RawModelResponse, TokenUsage},
    },
    image::value_objects::ImagePayload,
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` client. One request per call, no retry.
#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

impl From<UsageMetadata> for TokenUsage {
    fn from(usage: UsageMetadata) -> Self {
        TokenUsage {
            prompt_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        }
    }
}

impl GeminiResponse {
    /// Text of the first candidate, parts concatenated.
    fn into_raw_response(self) -> Result<RawModelResponse, CoreError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .ok_or_else(|| CoreError::InferenceError("No response from LLM".to_string()))?;

        Ok(RawModelResponse {
            text,
            usage: self.usage_metadata.map(TokenUsage::from),
        })
    }
}

impl GeminiLLMClient {
    pub fn new(api_key: String, model_name: String) -> Self {
        Self::with_base_url(api_key, model_name, GEMINI_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, model_name: String, base_url: String) -> Self {
        Self {
            api_key,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<RawModelResponse, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::InferenceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::InferenceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::InferenceError(format!("Failed to parse LLM response: {}", e))
        })?;

        gemini_response.into_raw_response()
    }
}

fn image_request(prompt: String, image: ImagePayload) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text { text: prompt },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.media_type,
                        data: general_purpose::STANDARD.encode(&image.bytes),
                    },
                },
            ],
        }],
    }
}

fn text_request(prompt: String) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![Part::Text { text: prompt }],
        }],
    }
}

impl LLMClient for GeminiLLMClient {
    #[instrument(skip_all, fields(model = %self.model_name, image_bytes = image.bytes.len()))]
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImagePayload,
    ) -> Result<RawModelResponse, CoreError> {
        self.call_gemini_api(image_request(prompt, image)).await
    }

    #[instrument(skip_all, fields(model = %self.model_name))]
    async fn generate_with_text(&self, prompt: String) -> Result<RawModelResponse, CoreError> {
        self.call_gemini_api(text_request(prompt)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::infrastructure::stub_server::StubServer;

    #[test]
    fn test_image_request_carries_prompt_and_inline_data() {
        let request = image_request(
            "describe".to_string(),
            ImagePayload::new(vec![1, 2, 3], "image/png"),
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "parts": [
                        { "text": "describe" },
                        { "inline_data": { "mime_type": "image/png", "data": "AQID" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_text_request_has_single_part() {
        assert_eq!(
            serde_json::to_value(text_request("hello".to_string())).unwrap(),
            json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn test_response_text_and_usage_are_extracted() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "```json\n{" }, { "text": "}\n```" }], "role": "model" },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 812,
                "candidatesTokenCount": 95,
                "totalTokenCount": 907
            }
        }))
        .unwrap();

        let raw = response.into_raw_response().unwrap();

        assert_eq!(raw.text, "```json\n{}\n```");
        assert_eq!(
            raw.usage,
            Some(TokenUsage {
                prompt_tokens: Some(812),
                output_tokens: Some(95),
                total_tokens: Some(907),
            })
        );
    }

    #[test]
    fn test_missing_usage_is_tolerated() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        }))
        .unwrap();

        assert_eq!(response.into_raw_response().unwrap(), RawModelResponse::new("ok"));
    }

    #[test]
    fn test_empty_candidates_is_an_inference_error() {
        let response: GeminiResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();

        assert!(matches!(
            response.into_raw_response(),
            Err(CoreError::InferenceError(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_with_text_reads_stubbed_reply() {
        let stub = StubServer::start(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"name\":\"Salt\"}"}]}}]}"#,
        )
        .await;
        let client = GeminiLLMClient::with_base_url(
            "test-key".to_string(),
            "gemini-test".to_string(),
            format!("{}/", stub.base_url),
        );

        let raw = client.generate_with_text("hello".to_string()).await.unwrap();

        assert_eq!(raw.text, r#"{"name":"Salt"}"#);
        assert_eq!(
            stub.requests(),
            vec!["/models/gemini-test:generateContent?key=test-key".to_string()]
        );
    }

    #[tokio::test]
    async fn test_error_status_is_an_inference_error() {
        let stub = StubServer::start(503, "model overloaded").await;
        let client = GeminiLLMClient::with_base_url(
            "test-key".to_string(),
            "gemini-test".to_string(),
            stub.base_url.clone(),
        );

        let result = client
            .generate_with_image(
                "describe".to_string(),
                ImagePayload::new(vec![1, 2, 3], "image/jpeg"),
            )
            .await;

        let Err(CoreError::InferenceError(message)) = result else {
            panic!("expected an inference error, got {result:?}");
        };
        assert!(message.contains("503"), "{message}");
        assert!(message.contains("model overloaded"), "{message}");
    }
}
