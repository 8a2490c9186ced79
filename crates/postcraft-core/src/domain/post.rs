use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Social network a post targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    LinkedIn,
    #[serde(rename = "Twitter/X")]
    Twitter,
    Facebook,
}

impl Platform {
    /// Display name, also used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter/X",
            Platform::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "linkedin" => Ok(Platform::LinkedIn),
            "twitter/x" | "twitter" | "x" => Ok(Platform::Twitter),
            "facebook" => Ok(Platform::Facebook),
            other => Err(DomainError::Validation(format!("Unknown platform: {other}"))),
        }
    }
}

/// Lifecycle of a post. Only explicit user actions move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "scheduled" => Ok(PostStatus::Scheduled),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::Validation(format!("Unknown status: {other}"))),
        }
    }
}

/// Post entity - a unit of content drafted or scheduled by the user.
///
/// The serialized shape is the persisted snapshot format: camelCase keys,
/// `scheduledDate` as RFC 3339 and `createdAt` as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub platform: Platform,
    pub content: String,
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub status: PostStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post with a generated ID.
    pub fn new(
        platform: Platform,
        content: String,
        hashtags: Vec<String>,
        image_url: Option<String>,
    ) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            platform,
            content,
            hashtags,
            image_url,
            scheduled_date: now,
            status: PostStatus::Draft,
            created_at: now,
        }
    }
}

/// Truncated to milliseconds so `createdAt` survives the snapshot unchanged.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Per-status counters for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostStats {
    pub total: usize,
    pub drafts: usize,
    pub scheduled: usize,
    pub published: usize,
}

impl PostStats {
    pub fn from_posts<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Self {
        posts.into_iter().fold(Self::default(), |mut stats, post| {
            stats.total += 1;
            match post.status {
                PostStatus::Draft => stats.drafts += 1,
                PostStatus::Scheduled => stats.scheduled += 1,
                PostStatus::Published => stats.published += 1,
            }
            stats
        })
    }
}
