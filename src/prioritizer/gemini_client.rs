//! Gemini generative-language client
//!
//! One prompt in, one raw text completion out. The call is awaited once per
//! request with no retry and no shared state between requests; a slow or
//! failing upstream surfaces as a single typed error.

use super::gemini_config::GeminiConfig;
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Model call error types
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model integration is disabled")]
    Disabled,

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("upstream error: {0}")]
    UpstreamError(String),

    #[error("empty response: {0}")]
    EmptyResponse(String),
}

/// A text-completion model the prioritizer can call.
///
/// The trait seam exists so tests can script responses without a network.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one prompt and return the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Gemini API client
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        if !self.config.enabled {
            METRICS.record_model_call(false);
            return Err(ModelError::Disabled);
        }

        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            METRICS.record_model_call(false);
            ModelError::Disabled
        })?;

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        debug!(model = %self.config.model, "calling generateContent");

        let response = self
            .http
            .post(self.config.generate_url())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                METRICS.record_model_call(false);
                if e.is_timeout() {
                    ModelError::Timeout(e.to_string())
                } else {
                    ModelError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            METRICS.record_model_call(false);
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ModelError::UpstreamError(format!(
                "Status {}: {}",
                status, error_text
            )));
        }

        let generate_response: GenerateContentResponse = response.json().await.map_err(|e| {
            METRICS.record_model_call(false);
            ModelError::UpstreamError(e.to_string())
        })?;

        let text = generate_response.first_text();
        if text.is_empty() {
            METRICS.record_model_call(false);
            return Err(ModelError::EmptyResponse(
                "no candidate text in response".to_string(),
            ));
        }

        METRICS.record_model_call(true);
        Ok(text)
    }
}

// Request/response types for the generateContent API

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts
    fn first_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
