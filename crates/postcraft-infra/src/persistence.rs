//! Post snapshot persistence over any key-value storage backend.

use std::sync::Arc;

use async_trait::async_trait;

use postcraft_core::domain::Post;
use postcraft_core::ports::{KeyValueStore, POSTS_STORAGE_KEY, PersistenceError, PostPersistence};

/// Writes the whole post sequence as one JSON array under `socialPosts`.
pub struct KeyValuePersistence {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValuePersistence {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, POSTS_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }
}

#[async_trait]
impl PostPersistence for KeyValuePersistence {
    async fn load(&self) -> Result<Vec<Post>, PersistenceError> {
        let Some(raw) = self.storage.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }

    async fn persist(&self, posts: &[Post]) -> Result<(), PersistenceError> {
        let raw =
            serde_json::to_string(posts).map_err(|e| PersistenceError::Encode(e.to_string()))?;
        self.storage.set(&self.key, &raw).await?;
        tracing::debug!(key = %self.key, count = posts.len(), "Post snapshot persisted");
        Ok(())
    }
}
