//! Domain entities - the core business objects.

mod content;
mod credential;
mod post;

pub use content::{DraftRequest, GeneratedContent, Tone};
pub use credential::{ApiKey, CredentialSource, CredentialStatus, ResolvedCredential};
pub use post::{Platform, Post, PostStats, PostStatus};
