//! # Postcraft Infrastructure
//!
//! Concrete implementations of the ports defined in `postcraft-core`:
//! key-value storage backends, the post snapshot writer and the Gemini client.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory and file storage only
//! - `gemini` - Gemini REST client via reqwest
//! - `redis` - Redis-backed key-value storage

pub mod persistence;
pub mod storage;

#[cfg(feature = "gemini")]
pub mod gemini;

// Re-exports - always available
pub use persistence::KeyValuePersistence;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig};

#[cfg(feature = "redis")]
pub use storage::{RedisConfig, RedisKeyValueStore};
