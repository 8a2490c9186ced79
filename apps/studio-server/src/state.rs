//! Application state - shared across all handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;

use postcraft_core::ports::{GenerativeModel, KeyValueStore};
use postcraft_core::services::GeneratorConfig;
use postcraft_core::{ContentGenerator, CredentialResolver, PostStore, TrendSummarizer};
use postcraft_infra::{FileKeyValueStore, GeminiClient, InMemoryKeyValueStore, KeyValuePersistence};

use crate::config::{AppConfig, StorageBackend};

#[cfg(feature = "redis")]
use postcraft_infra::RedisKeyValueStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostStore>,
    pub generator: Arc<ContentGenerator>,
    pub trends: Arc<TrendSummarizer>,
    pub credentials: Arc<CredentialResolver>,
    pub generation_gate: Arc<GenerationGate>,
    pub storage_backend: &'static str,
}

impl AppState {
    /// Build the application state with the configured storage and the Gemini client.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (storage, backend) = init_storage(&config.storage).await;

        let model: Arc<dyn GenerativeModel> = Arc::new(
            GeminiClient::new(config.gemini.clone()).context("Failed to build Gemini client")?,
        );

        let state = Self::from_parts(
            storage,
            model,
            config.env_api_key.clone(),
            config.generator.clone(),
            backend,
        )
        .await;

        tracing::info!(
            storage = state.storage_backend,
            posts = state.posts.len().await,
            "Application state initialized"
        );

        Ok(state)
    }

    /// Wire the services over explicit storage and model implementations.
    pub async fn from_parts(
        storage: Arc<dyn KeyValueStore>,
        model: Arc<dyn GenerativeModel>,
        env_api_key: Option<String>,
        generator: GeneratorConfig,
        storage_backend: &'static str,
    ) -> Self {
        let credentials = Arc::new(CredentialResolver::new(storage.clone(), env_api_key));
        let persistence = Arc::new(KeyValuePersistence::new(storage));
        let posts = Arc::new(PostStore::load(persistence).await);

        let trends = Arc::new(TrendSummarizer::new(
            model.clone(),
            credentials.clone(),
            generator.text_model.clone(),
        ));
        let generator = Arc::new(ContentGenerator::new(model, credentials.clone(), generator));

        Self {
            posts,
            generator,
            trends,
            credentials,
            generation_gate: Arc::new(GenerationGate::default()),
            storage_backend,
        }
    }
}

async fn init_storage(backend: &StorageBackend) -> (Arc<dyn KeyValueStore>, &'static str) {
    match backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage - posts are lost on restart");
            (Arc::new(InMemoryKeyValueStore::new()), "memory")
        }
        StorageBackend::File(path) => {
            tracing::info!(path = %path.display(), "Using file storage");
            (Arc::new(FileKeyValueStore::new(path)), "file")
        }
        #[cfg(feature = "redis")]
        StorageBackend::Redis => match RedisKeyValueStore::from_env().await {
            Ok(storage) => (Arc::new(storage), "redis"),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to Redis: {}. Using in-memory fallback.",
                    e
                );
                (Arc::new(InMemoryKeyValueStore::new()), "memory")
            }
        },
        #[cfg(not(feature = "redis"))]
        StorageBackend::Redis => {
            tracing::warn!("Built without redis feature - using in-memory storage");
            (Arc::new(InMemoryKeyValueStore::new()), "memory")
        }
    }
}

/// Allows one generation call at a time; a second request is turned away
/// instead of queued.
#[derive(Debug, Default)]
pub struct GenerationGate {
    busy: AtomicBool,
}

impl GenerationGate {
    pub fn try_acquire(&self) -> Option<GenerationPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GenerationPermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Released on drop, whether the call succeeded or not.
#[derive(Debug)]
pub struct GenerationPermit<'a> {
    gate: &'a GenerationGate,
}

impl Drop for GenerationPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_allows_one_holder() {
        let gate = GenerationGate::default();
        let permit = gate.try_acquire().unwrap();
        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());

        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_file_storage_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            storage: StorageBackend::File(dir.path().join("storage.json")),
            ..AppConfig::default()
        };

        let first = AppState::new(&config).await.unwrap();
        first
            .posts
            .add(postcraft_core::domain::Post::new(
                postcraft_core::domain::Platform::Facebook,
                "Hello".into(),
                vec![],
                None,
            ))
            .await
            .unwrap();
        first.credentials.set_local_key("stored-key").await.unwrap();

        let second = AppState::new(&config).await.unwrap();
        assert_eq!(second.storage_backend, "file");
        assert_eq!(second.posts.len().await, 1);
        assert!(second.credentials.status().await.configured);
    }
}
