//! Generative model port - abstraction over hosted AI providers.

use async_trait::async_trait;

use crate::domain::ApiKey;

/// Provider-neutral generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub model: String,
    pub prompt: String,
    /// JSON schema the response text must follow. Implies JSON output.
    pub response_schema: Option<serde_json::Value>,
    pub temperature: Option<f32>,
}

impl ModelRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_schema: None,
            temperature: None,
        }
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// One piece of a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Text(String),
    /// Binary payload, base64-encoded.
    InlineData { mime_type: String, data: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub parts: Vec<ResponsePart>,
}

impl ModelResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![ResponsePart::Text(text.into())],
        }
    }

    /// Concatenated text parts, `None` when there is no text at all.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .parts
            .iter()
            .filter_map(|part| match part {
                ResponsePart::Text(text) => Some(text.as_str()),
                ResponsePart::InlineData { .. } => None,
            })
            .collect();

        if text.trim().is_empty() { None } else { Some(text) }
    }

    /// Base64 data of the first non-empty inline part.
    pub fn first_inline_data(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            ResponsePart::InlineData { data, .. } if !data.is_empty() => Some(data.as_str()),
            _ => None,
        })
    }
}

/// Generative model trait - implemented by provider clients.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: ModelRequest,
    ) -> Result<ModelResponse, ProviderError>;
}

/// Provider-side failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}
