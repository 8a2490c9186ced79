//! Data Transfer Objects - request/response types for the studio API.

use serde::{Deserialize, Serialize};

/// Request to generate a post draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDraftRequest {
    pub topic: String,
    pub platform: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub include_emoji: Option<bool>,
    #[serde(default)]
    pub generate_image: bool,
}

/// Request to render an image from a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub image_url: String,
}

/// Request to save an approved draft as a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePostRequest {
    pub platform: String,
    pub content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Post counters by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub drafts: usize,
    pub scheduled: usize,
    pub published: usize,
}

/// Dashboard overview, generic over the post record type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse<P> {
    pub counts: StatusCounts,
    pub recent_drafts: Vec<P>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendResponse {
    pub text: String,
    pub generated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_source: Option<String>,
    pub storage_backend: String,
    pub text_model: String,
    pub image_model: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

/// One day of the weekly engagement chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementPoint {
    pub name: String,
    pub instagram: u32,
    pub linkedin: u32,
    pub twitter: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceSegment {
    pub name: String,
    pub value: u32,
}

/// Static sample series; there is no analytics pipeline behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub sample: bool,
    pub engagement: Vec<EngagementPoint>,
    pub audience: Vec<AudienceSegment>,
}
