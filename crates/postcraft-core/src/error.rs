//! Domain-level error types.

use thiserror::Error;

use crate::ports::{PersistenceError, ProviderError, StorageError};

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Post store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A post with id {0} already exists")]
    DuplicateId(String),

    #[error("Failed to persist posts: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Content generation failures.
///
/// `MissingCredential` is kept apart from provider failures so callers can
/// send the user to settings instead of retrying.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider call failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Model returned a malformed payload: {0}")]
    MalformedPayload(String),

    #[error("No image found in the model response")]
    NoImage,
}

impl GenerationError {
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, GenerationError::MissingCredential)
    }
}
