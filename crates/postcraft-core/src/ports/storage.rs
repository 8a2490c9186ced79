//! Durable key-value storage port.

use async_trait::async_trait;

/// Key holding the JSON array of posts.
pub const POSTS_STORAGE_KEY: &str = "socialPosts";

/// Key holding the user-supplied provider API key.
pub const API_KEY_STORAGE_KEY: &str = "gemini_api_key";

/// Key-value storage - abstraction over local storage backends (file, Redis, in-memory).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
