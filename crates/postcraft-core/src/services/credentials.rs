//! Provider credential resolution.

use std::sync::Arc;

use crate::domain::{ApiKey, CredentialSource, CredentialStatus, ResolvedCredential};
use crate::error::DomainError;
use crate::ports::{API_KEY_STORAGE_KEY, KeyValueStore, StorageError};

/// Resolves the provider API key: a key stored through settings wins over
/// the one supplied by the environment.
pub struct CredentialResolver {
    storage: Arc<dyn KeyValueStore>,
    env_key: Option<ApiKey>,
}

impl CredentialResolver {
    pub fn new(storage: Arc<dyn KeyValueStore>, env_key: Option<String>) -> Self {
        Self {
            storage,
            env_key: env_key.and_then(ApiKey::new),
        }
    }

    pub async fn resolve(&self) -> Option<ResolvedCredential> {
        match self.storage.get(API_KEY_STORAGE_KEY).await {
            Ok(Some(raw)) => {
                if let Some(key) = ApiKey::new(raw) {
                    return Some(ResolvedCredential {
                        key,
                        source: CredentialSource::Local,
                    });
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored API key; trying environment");
            }
        }

        self.env_key.clone().map(|key| ResolvedCredential {
            key,
            source: CredentialSource::Environment,
        })
    }

    pub async fn api_key(&self) -> Option<ApiKey> {
        self.resolve().await.map(|c| c.key)
    }

    pub async fn status(&self) -> CredentialStatus {
        let source = self.resolve().await.map(|c| c.source);
        CredentialStatus {
            configured: source.is_some(),
            source,
        }
    }

    pub async fn set_local_key(&self, raw: &str) -> Result<(), DomainError> {
        let key = ApiKey::new(raw)
            .ok_or_else(|| DomainError::Validation("API key must not be empty".to_string()))?;
        self.storage.set(API_KEY_STORAGE_KEY, key.expose()).await?;
        tracing::info!("Stored API key updated");
        Ok(())
    }

    pub async fn clear_local_key(&self) -> Result<(), StorageError> {
        self.storage.remove(API_KEY_STORAGE_KEY).await?;
        tracing::info!("Stored API key cleared");
        Ok(())
    }
}
