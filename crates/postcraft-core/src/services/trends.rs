//! Trend summarizer - advisory content ideas from recent posts.

use std::sync::Arc;

use crate::ports::{GenerativeModel, ModelRequest};

use super::CredentialResolver;
use super::prompts;

/// Why a fixed message was returned instead of model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoPosts,
    MissingCredential,
    EmptyResponse,
    ProviderFailed,
}

impl FallbackReason {
    pub fn code(&self) -> &'static str {
        match self {
            FallbackReason::NoPosts => "no_posts",
            FallbackReason::MissingCredential => "missing_credential",
            FallbackReason::EmptyResponse => "empty_response",
            FallbackReason::ProviderFailed => "provider_failed",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FallbackReason::NoPosts => {
                "Create a few posts so the assistant can learn your style and offer suggestions."
            }
            FallbackReason::MissingCredential => {
                "Configure your API key in settings to receive trend analysis."
            }
            FallbackReason::EmptyResponse => "Could not analyze trends right now.",
            FallbackReason::ProviderFailed => "Error analyzing trends. Check your API key.",
        }
    }
}

/// Outcome of a summarization. There is no error case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrendAdvice {
    Generated(String),
    Fallback(FallbackReason),
}

impl TrendAdvice {
    pub fn text(&self) -> &str {
        match self {
            TrendAdvice::Generated(text) => text,
            TrendAdvice::Fallback(reason) => reason.message(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, TrendAdvice::Generated(_))
    }
}

pub struct TrendSummarizer {
    model: Arc<dyn GenerativeModel>,
    credentials: Arc<CredentialResolver>,
    model_id: String,
}

impl TrendSummarizer {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        credentials: Arc<CredentialResolver>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            model,
            credentials,
            model_id: model_id.into(),
        }
    }

    /// Propose three complementary content ideas from recent excerpts.
    /// No call is made without excerpts or without a key.
    pub async fn summarize(&self, excerpts: &[String]) -> TrendAdvice {
        if excerpts.is_empty() {
            return TrendAdvice::Fallback(FallbackReason::NoPosts);
        }
        let Some(api_key) = self.credentials.api_key().await else {
            return TrendAdvice::Fallback(FallbackReason::MissingCredential);
        };

        let request = ModelRequest::new(&self.model_id, prompts::trend_prompt(excerpts));
        match self.model.generate(&api_key, request).await {
            Ok(response) => match response.text() {
                Some(text) => TrendAdvice::Generated(text.trim().to_string()),
                None => TrendAdvice::Fallback(FallbackReason::EmptyResponse),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Trend analysis failed");
                TrendAdvice::Fallback(FallbackReason::ProviderFailed)
            }
        }
    }
}
