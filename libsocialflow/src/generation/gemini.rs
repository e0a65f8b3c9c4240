//! Gemini API backend
//!
//! Calls the Generative Language REST API generateContent endpoint
//! (https://generativelanguage.googleapis.com) using reqwest.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::{GenerationError, Result};
use crate::generation::{GenerationBackend, GenerationRequest};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// generateContent request body
#[derive(Debug, Serialize)]
struct GenerateContentBody {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationSettings>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

/// Structured-output settings, attached only when a schema is requested
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationSettings {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    status: String,
    message: String,
}

/// Generation backend speaking the Gemini REST API
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiBackend {
    /// Create a backend with an explicit API key
    ///
    /// The model, base URL override, and transport timeout come from the
    /// config; the key is passed in so tests and embedders can supply one
    /// without touching the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: String, config: &GenerationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Network(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url,
        })
    }

    /// Create a backend resolving the API key from the configured env var
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the environment variable named
    /// in the config is unset.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        Self::new(api_key, config)
    }
}

#[async_trait::async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<String, GenerationError> {
        let body = GenerateContentBody {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: request.response_schema.as_ref().map(|schema| {
                GenerationSettings {
                    response_mime_type: "application/json".to_string(),
                    response_schema: schema.clone(),
                }
            }),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(
            model = %self.model,
            constrained = request.response_schema.is_some(),
            "Sending generation request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GenerationError::RateLimit(
                service_error_message(&error_body)
                    .unwrap_or_else(|| "Too many requests".to_string()),
            ));
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            if let Some(message) = service_error_message(&error_body) {
                return Err(GenerationError::Network(format!(
                    "Generation API error: {}",
                    message
                )));
            }

            return Err(GenerationError::Network(format!(
                "Generation API returned {}: {}",
                status, error_body
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponseShape(format!("Failed to parse response: {}", e))
        })?;

        let text = collect_text(&api_response);
        if text.is_empty() {
            return Err(GenerationError::EmptyContent);
        }
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Concatenated text parts of the first candidate
fn collect_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.clone())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Pull the human-readable message out of the API's error JSON, if it parses
fn service_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| format!("{}: {}", e.error.status, e.error.message))
}
