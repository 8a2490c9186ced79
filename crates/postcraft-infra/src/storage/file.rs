//! File-backed key-value storage - one JSON object on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use postcraft_core::ports::{KeyValueStore, StorageError};

/// Durable local storage kept as a single `{key: value}` JSON document.
///
/// Every write rewrites the whole document through a temporary file and a
/// rename, so a crash never leaves a half-written file behind. A missing file
/// reads as an empty store. A file that is not a JSON object fails reads, and
/// the next write moves it aside to `<path>.corrupt` and starts over.
pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<path>.<suffix>`, next to the storage file.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    async fn read_document(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Storage file is not a JSON object");
            StorageError::Serialization(e.to_string())
        })
    }

    /// Document to base a write on. A corrupt file is set aside instead of
    /// blocking every later write.
    async fn document_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_document().await {
            Err(StorageError::Serialization(reason)) => {
                let aside = self.sibling("corrupt");
                tracing::warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    %reason,
                    "Discarding corrupt storage file"
                );
                if let Err(e) = tokio::fs::rename(&self.path, &aside).await {
                    tracing::warn!(error = %e, "Could not move corrupt storage file aside");
                }
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn write_document(&self, document: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }

        let body = serde_json::to_vec_pretty(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.sibling("tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut document = self.document_for_write().await?;
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document).await?;
        tracing::debug!(key = %key, bytes = value.len(), "Storage key written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut document = self.document_for_write().await?;
        if document.remove(key).is_some() {
            self.write_document(&document).await?;
            tracing::debug!(key = %key, "Storage key removed");
        }
        Ok(())
    }
}
