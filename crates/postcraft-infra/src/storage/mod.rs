//! Key-value storage implementations - file, Redis and in-memory.

mod file;
mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisKeyValueStore};
