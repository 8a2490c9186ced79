//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use postcraft_core::services::GeneratorConfig;
use postcraft_infra::GeminiConfig;

/// Where posts and the stored API key live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File(PathBuf),
    Redis,
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File(_) => "file",
            StorageBackend::Redis => "redis",
        }
    }

    fn from_env() -> Self {
        let path = env::var("STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/local-storage.json"));

        match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "redis" => StorageBackend::Redis,
            "file" => StorageBackend::File(path),
            other => {
                tracing::warn!(backend = %other, "Unknown STORAGE_BACKEND, using file storage");
                StorageBackend::File(path)
            }
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Fallback provider key; a key stored through settings takes precedence.
    pub env_api_key: Option<String>,
    pub generator: GeneratorConfig,
    pub gemini: GeminiConfig,
    /// Maximum JSON body size; saved posts may carry data-URI images.
    pub json_limit: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = GeneratorConfig::default();
        let generator = GeneratorConfig {
            text_model: env::var("GEMINI_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: env::var("GEMINI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            temperature: defaults.temperature,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            storage: StorageBackend::from_env(),
            env_api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("API_KEY"))
                .ok()
                .filter(|key| !key.trim().is_empty()),
            generator,
            gemini: GeminiConfig::from_env(),
            json_limit: env::var("JSON_LIMIT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            storage: StorageBackend::Memory,
            env_api_key: None,
            generator: GeneratorConfig::default(),
            gemini: GeminiConfig::default(),
            json_limit: 10 * 1024 * 1024,
        }
    }
}
