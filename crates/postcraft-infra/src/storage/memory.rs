//! In-memory key-value storage - used for ephemeral sessions and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postcraft_core::ports::{KeyValueStore, StorageError};

/// In-memory storage using a HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryKeyValueStore {
    store: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }
}
