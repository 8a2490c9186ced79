//! Test doubles for the ports.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::{ApiKey, Post};
use crate::ports::{
    GenerativeModel, KeyValueStore, ModelRequest, ModelResponse, PersistenceError,
    PostPersistence, ProviderError, StorageError,
};

#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn with(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Persistence that keeps the last snapshot and can be told to fail writes.
#[derive(Default)]
pub struct MemoryPersistence {
    pub snapshot: Mutex<Option<Vec<Post>>>,
    pub writes: Mutex<usize>,
    pub fail_writes: AtomicBool,
}

impl MemoryPersistence {
    pub fn snapshot(&self) -> Vec<Post> {
        self.snapshot.lock().unwrap().clone().unwrap_or_default()
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostPersistence for MemoryPersistence {
    async fn load(&self) -> Result<Vec<Post>, PersistenceError> {
        Ok(self.snapshot())
    }

    async fn persist(&self, posts: &[Post]) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("disk full".into()).into());
        }
        *self.snapshot.lock().unwrap() = Some(posts.to_vec());
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}

/// Model stub replaying queued responses and recording every request.
#[derive(Default)]
pub struct StubModel {
    responses: Mutex<VecDeque<Result<ModelResponse, ProviderError>>>,
    pub requests: Mutex<Vec<ModelRequest>>,
}

impl StubModel {
    pub fn replying(responses: Vec<Result<ModelResponse, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> ModelRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(
        &self,
        _api_key: &ApiKey,
        request: ModelRequest,
    ) -> Result<ModelResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Transport("no stubbed response".into())))
    }
}
