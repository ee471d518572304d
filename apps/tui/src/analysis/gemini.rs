//! Gemini `generateContent` backend.
//!
//! Async reqwest client. The API key is injected through [`GeminiConfig`];
//! a missing key fails the request the same way a rejected key does.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{GenerationBackend, GenerationRequest};
use super::error::AnalysisError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl GeminiConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

pub struct GeminiBackend {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("mena-energy-tracker/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalysisError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, AnalysisError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AnalysisError::Transport("no API key configured (set GEMINI_API_KEY)".to_string())
        })?;

        let endpoint = self.endpoint();
        tracing::debug!(model = %self.config.model, %endpoint, "calling generateContent");

        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::from_request(request))
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map_or(body, |envelope| envelope.error.message);
            return Err(AnalysisError::Transport(format!(
                "HTTP {}: {message}",
                status.as_u16()
            )));
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AnalysisError::Transport(format!("undecodable response envelope: {e}"))
        })?;

        Ok(envelope.into_text())
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig<'a>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: &request.response_mime_type,
                response_schema: &request.response_schema,
            },
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisClient, ErrorKind};
    use crate::test_support::{sample_json, sample_result};
    use httpmock::prelude::*;

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn backend_for(server: &MockServer, api_key: Option<&str>) -> Result<GeminiBackend, AnalysisError> {
        GeminiBackend::new(GeminiConfig {
            api_key: api_key.map(str::to_string),
            model: DEFAULT_MODEL.to_string(),
            api_base: server.base_url(),
        })
    }

    #[test]
    fn request_body_matches_generate_content_contract() -> Result<(), Box<dyn std::error::Error>> {
        let request = GenerationRequest::energy_analysis();
        let body = serde_json::to_value(GenerateContentRequest::from_request(&request))?;

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], request.prompt.as_str());
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            request.system_instruction.as_str()
        );
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], request.response_schema);

        Ok(())
    }

    #[test]
    fn joins_text_parts_of_first_candidate() -> Result<(), Box<dyn std::error::Error>> {
        let envelope: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))?;
        assert_eq!(envelope.into_text().as_deref(), Some("{\"a\":1}"));

        let no_candidates: GenerateContentResponse = serde_json::from_str("{}")?;
        assert_eq!(no_candidates.into_text(), None);

        let no_text: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))?;
        assert_eq!(no_text.into_text(), None);

        Ok(())
    }

    #[tokio::test]
    async fn end_to_end_success() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(GENERATE_PATH)
                    .header("x-goog-api-key", "test-key");
                then.status(200).json_body(serde_json::json!({
                    "candidates": [{ "content": { "parts": [{ "text": sample_json() }] } }]
                }));
            })
            .await;

        let client = AnalysisClient::new(backend_for(&server, Some("test-key"))?);
        let result = client.fetch_energy_analysis().await?;

        assert_eq!(result, sample_result());
        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn http_error_uses_service_message() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(403).json_body(serde_json::json!({
                    "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
                }));
            })
            .await;

        let backend = backend_for(&server, Some("bad-key"))?;
        let err = backend.generate(&GenerationRequest::energy_analysis()).await.err();

        match err {
            Some(AnalysisError::Transport(message)) => {
                assert!(message.contains("HTTP 403"));
                assert!(message.contains("API key not valid"));
            }
            other => panic!("expected transport failure, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn candidate_without_text_is_empty() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200)
                    .json_body(serde_json::json!({ "candidates": [{ "finishReason": "SAFETY" }] }));
            })
            .await;

        let client = AnalysisClient::new(backend_for(&server, Some("test-key"))?);
        let err = client.fetch_energy_analysis().await.err();
        assert_eq!(err.map(|err| err.kind()), Some(ErrorKind::EmptyResponse));

        Ok(())
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_service() -> Result<(), Box<dyn std::error::Error>> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(GENERATE_PATH);
                then.status(200).json_body(serde_json::json!({}));
            })
            .await;

        let backend = backend_for(&server, None)?;
        let err = backend.generate(&GenerationRequest::energy_analysis()).await.err();

        assert_eq!(err.map(|err| err.kind()), Some(ErrorKind::Transport));
        mock.assert_calls_async(0).await;

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_failure() -> Result<(), Box<dyn std::error::Error>> {
        let backend = GeminiBackend::new(GeminiConfig {
            api_key: Some("test-key".to_string()),
            model: DEFAULT_MODEL.to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        })?;

        let err = backend.generate(&GenerationRequest::energy_analysis()).await.err();
        assert_eq!(err.map(|err| err.kind()), Some(ErrorKind::Transport));

        Ok(())
    }
}
