//! Google Gemini `generateContent` client.
//!
//! See: <https://ai.google.dev/api/generate-content>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::traits::CompletionProvider;
use crate::{HeimdallError, Result};

/// Default base URL for the Gemini API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model: small, fast and available on the free tier.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-8b";

/// Settings for a [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model identifier, e.g. `gemini-1.5-flash-8b`.
    pub model: String,
    /// Sampling temperature. Provider default when unset.
    pub temperature: Option<f32>,
    /// Output token cap. Provider default when unset.
    pub max_output_tokens: Option<u32>,
    /// Per-request timeout. Default: 30s.
    pub request_timeout: Duration,
    /// API base URL (override for testing with wiremock).
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            max_output_tokens: None,
            request_timeout: Duration::from_secs(30),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_output_tokens(mut self, n: u32) -> Self {
        self.max_output_tokens = Some(n);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client.
    ///
    /// Fails with [`HeimdallError::Configuration`] when the key or model is
    /// empty, or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, config: GeminiConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(HeimdallError::Configuration(
                "Gemini API key is empty".to_string(),
            ));
        }
        if config.model.trim().is_empty() {
            return Err(HeimdallError::Configuration(
                "Gemini model identifier is empty".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| HeimdallError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            http,
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Generate a completion for a single user prompt.
    #[instrument(skip_all, fields(model = %self.config.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let response = self.check_status(response).await?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| HeimdallError::MalformedResponse(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(HeimdallError::EmptyResponse);
        }
        debug!(chars = text.len(), "completion received");
        Ok(text)
    }

    /// Check response status and map to appropriate error.
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 | 403 => Err(HeimdallError::AuthenticationFailed),
            404 => Err(HeimdallError::ModelNotFound(self.config.model.clone())),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(HeimdallError::RateLimited { retry_after })
            }
            code => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| format!("Gemini API error: {status}"));
                Err(HeimdallError::Api {
                    status: code,
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }
}

// Request/response types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
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

    #[test]
    fn rejects_empty_key() {
        let err = GeminiClient::new("  ", GeminiConfig::default()).err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn rejects_empty_model() {
        let err = GeminiClient::new("key", GeminiConfig::new("")).err().unwrap();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: Some(0.7),
                max_output_tokens: None,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert!(json["generationConfig"]["temperature"].is_number());
        assert!(json["generationConfig"].get("maxOutputTokens").is_none());
    }
}
