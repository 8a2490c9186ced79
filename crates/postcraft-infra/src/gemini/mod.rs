//! Gemini (Generative Language API) client.

mod client;
mod wire;

pub use client::{GeminiClient, GeminiConfig};
