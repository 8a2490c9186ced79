//! reqwest-based implementation of the [`GenerativeModel`] port.

use std::time::Duration;

use async_trait::async_trait;

use postcraft_core::domain::ApiKey;
use postcraft_core::ports::{GenerativeModel, ModelRequest, ModelResponse, ProviderError};

use super::wire::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, without the `/v1beta` suffix.
    pub base_url: String,
    /// Per-request timeout. `None` leaves the provider's own behavior in charge.
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }
}

/// Client for the `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: ModelRequest,
    ) -> Result<ModelResponse, ProviderError> {
        let url = self.endpoint(&request.model);
        let body = GenerateContentRequest::from(&request);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or(raw);

            tracing::warn!(model = %request.model, status = status.as_u16(), "Gemini request rejected");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let response = ModelResponse::from(payload);
        tracing::debug!(model = %request.model, parts = response.parts.len(), "Gemini response received");
        Ok(response)
    }
}
