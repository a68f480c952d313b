/// LLM Client: the single point of entry for all Gemini API calls.
///
/// No other module may call the generative-language API directly. Route handlers and
/// the analysis service depend on the `GenerativeModel` trait, so tests swap in a stub.
///
/// Calls are single-shot: no retry, no streaming, no caching. Identical inputs always
/// trigger a new request.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("prompt was blocked: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A generative-language service: (document text, instruction) → generated text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, document_text: &str, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, surfaced in logs.
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Converts the raw response into the generated text or the reason there is none.
    pub fn into_text(self) -> Result<String, LlmError> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(LlmError::Blocked(reason));
        }
        if let Some(text) = self.text() {
            return Ok(text);
        }
        let finish_reason = self.candidates.first().and_then(|c| c.finish_reason.as_deref());
        match finish_reason {
            Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                Err(LlmError::Blocked(reason.to_string()))
            }
            _ => Err(LlmError::EmptyContent),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            api_base.trim_end_matches('/'),
            model
        );
        Ok(Self {
            client,
            api_key,
            model,
            endpoint,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            config.google_api_key.clone(),
            config.gemini_model.clone(),
            &config.gemini_api_base,
            Duration::from_secs(config.llm_timeout_secs),
        )
    }

    #[cfg(test)]
    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Builds the single user turn: the document text first, then the instruction.
fn build_request<'a>(document_text: &'a str, prompt: &'a str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![
                RequestPart {
                    text: document_text,
                },
                RequestPart { text: prompt },
            ],
        }],
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, document_text: &str, prompt: &str) -> Result<String, LlmError> {
        let request_body = build_request(document_text, prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed.into_text()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_puts_document_before_prompt() {
        let body = serde_json::to_value(build_request("RESUME TEXT", "INSTRUCTION")).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(parts[0]["text"], "RESUME TEXT");
        assert_eq!(parts[1]["text"], "INSTRUCTION");
    }

    #[test]
    fn test_endpoint_includes_model_and_trims_slash() {
        let client = GeminiClient::new(
            "key".to_string(),
            "gemini-1.5-flash".to_string(),
            "https://generativelanguage.googleapis.com/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(client.model_name(), "gemini-1.5-flash");
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Profession: "}, {"text": "Backend Engineer"}]},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 40, "totalTokenCount": 160}
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.usage_metadata.as_ref().unwrap().prompt_token_count, 120);
        assert_eq!(parsed.into_text().unwrap(), "Profession: Backend Engineer");
    }

    #[test]
    fn test_blocked_prompt_is_reported() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed.into_text(), Err(LlmError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn test_safety_finish_without_text_is_blocked() {
        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed.into_text(), Err(LlmError::Blocked(_))));
    }

    #[test]
    fn test_no_candidates_is_empty_content() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(parsed.into_text(), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_error_body_message_is_extracted() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let err: GeminiError = serde_json::from_str(body).unwrap();
        assert_eq!(err.error.message, "API key not valid.");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        let client = GeminiClient::new(
            "key".to_string(),
            "gemini-1.5-flash".to_string(),
            "http://127.0.0.1:9",
            Duration::from_secs(2),
        )
        .unwrap();
        let result = client.generate("resume", "prompt").await;
        assert!(matches!(result, Err(LlmError::Http(_))));
    }
}
