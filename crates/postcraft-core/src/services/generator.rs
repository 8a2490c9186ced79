//! Content generation client - drafts post copy and renders images through
//! a [`GenerativeModel`].

use std::sync::Arc;

use crate::domain::{ApiKey, DraftRequest, GeneratedContent, Platform, Tone};
use crate::error::GenerationError;
use crate::ports::{GenerativeModel, ModelRequest};

use super::CredentialResolver;
use super::prompts;

/// Model selection for generation calls.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            temperature: 0.7,
        }
    }
}

/// Drafts posts and images. Holds no local state; a failed call fails the
/// whole operation and is never retried here.
pub struct ContentGenerator {
    model: Arc<dyn GenerativeModel>,
    credentials: Arc<CredentialResolver>,
    config: GeneratorConfig,
}

impl ContentGenerator {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        credentials: Arc<CredentialResolver>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            model,
            credentials,
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Ask the text model for a structured draft.
    pub async fn generate_draft(
        &self,
        topic: &str,
        platform: Platform,
        tone: Tone,
        include_emoji: bool,
    ) -> Result<GeneratedContent, GenerationError> {
        if topic.trim().is_empty() {
            return Err(GenerationError::InvalidInput("Topic must not be empty".into()));
        }
        let api_key = self.api_key().await?;

        let request = ModelRequest::new(
            &self.config.text_model,
            prompts::draft_prompt(topic, platform, tone, include_emoji),
        )
        .with_response_schema(prompts::draft_response_schema())
        .with_temperature(self.config.temperature);

        tracing::debug!(model = %request.model, %platform, %tone, "Requesting post draft");

        let response = self.model.generate(&api_key, request).await.map_err(|e| {
            tracing::error!(error = %e, "Draft generation failed");
            GenerationError::from(e)
        })?;

        let text = response.text().ok_or(GenerationError::EmptyResponse)?;
        parse_draft(&text)
    }

    /// Render an image and return it as a `data:image/png;base64,...` URI.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::InvalidInput("Image prompt must not be empty".into()));
        }
        let api_key = self.api_key().await?;

        let request = ModelRequest::new(&self.config.image_model, prompt.trim());
        tracing::debug!(model = %request.model, "Requesting image");

        let response = self.model.generate(&api_key, request).await.map_err(|e| {
            tracing::error!(error = %e, "Image generation failed");
            GenerationError::from(e)
        })?;

        response
            .first_inline_data()
            .map(|data| format!("data:image/png;base64,{data}"))
            .ok_or(GenerationError::NoImage)
    }

    /// Full creation flow: draft, then the optional image.
    ///
    /// Image failures are logged and dropped; the draft is still returned,
    /// just without `image_base64`.
    pub async fn compose(&self, request: &DraftRequest) -> Result<GeneratedContent, GenerationError> {
        let mut draft = self
            .generate_draft(
                &request.topic,
                request.platform,
                request.tone,
                request.include_emoji,
            )
            .await?;

        if request.generate_image && !draft.image_prompt.trim().is_empty() {
            match self.generate_image(&draft.image_prompt).await {
                Ok(image) => draft.image_base64 = Some(image),
                Err(e) => tracing::warn!(error = %e, "Image generation failed; keeping text draft"),
            }
        }

        Ok(draft)
    }

    async fn api_key(&self) -> Result<ApiKey, GenerationError> {
        self.credentials
            .api_key()
            .await
            .ok_or(GenerationError::MissingCredential)
    }
}

fn parse_draft(text: &str) -> Result<GeneratedContent, GenerationError> {
    let mut draft: GeneratedContent = serde_json::from_str(text.trim())
        .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;
    // The image only ever comes from a separate image call.
    draft.image_base64 = None;
    Ok(draft)
}
