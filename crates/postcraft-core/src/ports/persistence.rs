//! Post snapshot persistence port.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::Post;

/// Full-document persistence of the post collection.
///
/// Every mutation hands over the whole sequence; implementations may store it
/// however they like as long as `load` returns the last persisted sequence.
#[async_trait]
pub trait PostPersistence: Send + Sync {
    /// Read the last snapshot. An absent snapshot is an empty collection.
    async fn load(&self) -> Result<Vec<Post>, PersistenceError>;

    /// Replace the stored snapshot with `posts`.
    async fn persist(&self, posts: &[Post]) -> Result<(), PersistenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Snapshot present but not a valid post array.
    #[error("Stored snapshot is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
