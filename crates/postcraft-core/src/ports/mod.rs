//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod model;
mod persistence;
mod storage;

pub use model::{GenerativeModel, ModelRequest, ModelResponse, ProviderError, ResponsePart};
pub use persistence::{PersistenceError, PostPersistence};
pub use storage::{API_KEY_STORAGE_KEY, KeyValueStore, POSTS_STORAGE_KEY, StorageError};
