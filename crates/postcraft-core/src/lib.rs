//! # Postcraft Core
//!
//! The domain layer of the Postcraft studio.
//! Posts, generation contracts and the services built on them live here;
//! storage backends and the AI provider are reached only through the ports.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{DomainError, GenerationError, StoreError};
pub use services::{ContentGenerator, CredentialResolver, PostStore, TrendSummarizer};
