use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Platform;
use crate::error::DomainError;

/// Voice requested for generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Humorous,
    Inspirational,
    Educational,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Humorous,
        Tone::Inspirational,
        Tone::Educational,
    ];

    /// Label embedded in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Humorous => "Humorous",
            Tone::Inspirational => "Inspirational",
            Tone::Educational => "Educational",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::Validation(format!("Unknown tone: {s}")))
    }
}

/// Output of a text-generation round-trip. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub text: String,
    /// 5-10 items are requested, not enforced.
    pub hashtags: Vec<String>,
    /// English description used only to drive image generation.
    pub image_prompt: String,
    /// Rendered image as a `data:` URI, present only after image generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

/// Parameters of one creation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub topic: String,
    pub platform: Platform,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default = "default_true")]
    pub include_emoji: bool,
    #[serde(default)]
    pub generate_image: bool,
}

fn default_true() -> bool {
    true
}

impl DraftRequest {
    pub fn new(topic: impl Into<String>, platform: Platform, tone: Tone) -> Self {
        Self {
            topic: topic.into(),
            platform,
            tone,
            include_emoji: true,
            generate_image: false,
        }
    }

    pub fn with_emoji(mut self, include_emoji: bool) -> Self {
        self.include_emoji = include_emoji;
        self
    }

    pub fn with_image(mut self, generate_image: bool) -> Self {
        self.generate_image = generate_image;
        self
    }
}
