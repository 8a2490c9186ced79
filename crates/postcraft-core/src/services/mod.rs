//! Application services built on the domain and ports.

mod credentials;
mod generator;
mod post_store;
mod prompts;
mod trends;

pub use credentials::CredentialResolver;
pub use generator::{ContentGenerator, GeneratorConfig};
pub use post_store::PostStore;
pub use trends::{FallbackReason, TrendAdvice, TrendSummarizer};
