//! Configuration for the ingestion and retrieval service
//!
//! Values come from an optional TOML file with environment variables applied
//! on top for deployment overrides and secrets. Everything is read once at
//! startup and never mutated.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Source file fetch configuration
    #[serde(default)]
    pub fetch: FetchConfig,
    /// OCR service configuration
    #[serde(default)]
    pub ocr: OcrConfig,
    /// Embedding service configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Vector store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides on top of the loaded values
    ///
    /// Secrets (API keys, store password) are expected to arrive this way
    /// rather than through the config file.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = env_var("SERVER_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = v;
        }
        if let Some(v) = env_var("OCR_BASE_URL") {
            self.ocr.base_url = v;
        }
        if let Some(v) = env_var("OCR_MODEL") {
            self.ocr.model = v;
        }
        if let Some(v) = env_var("OCR_API_KEY") {
            self.ocr.api_key = Some(v);
        }
        if let Some(v) = env_var("EMBEDDING_BASE_URL") {
            self.embedding.base_url = v;
        }
        if let Some(v) = env_var("EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Some(v) = env_var("EMBEDDING_API_KEY") {
            self.embedding.api_key = Some(v);
        }
        if let Some(v) = env_var("STORE_HOST") {
            self.store.host = v;
        }
        if let Some(v) = env_var("STORE_PORT").and_then(|v| v.parse().ok()) {
            self.store.port = v;
        }
        if let Some(v) = env_var("STORE_PASSWORD") {
            self.store.password = Some(v);
        }
        if let Some(v) = env_var("STORE_DATABASE").and_then(|v| v.parse().ok()) {
            self.store.database = v;
        }
        if let Some(v) = env_var("STORE_COLLECTION") {
            self.store.collection = v;
        }
        self
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Source file fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum accepted file size in bytes (default: 100MB)
    pub max_file_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_file_bytes: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// OCR service configuration (OpenAI-compatible vision endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Vision model identifier
    pub model: String,
    /// API key, sent as a bearer token when set
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            model: "llava".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

/// Embedding service configuration (OpenAI-compatible endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Embedding model identifier
    pub model: String,
    /// Embedding dimensions (768 for nomic-embed-text)
    pub dimensions: usize,
    /// API key, sent as a bearer token when set
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            api_key: None,
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

/// Vector store connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// URL scheme (http or https)
    pub scheme: String,
    /// Store host
    pub host: String,
    /// Store port
    pub port: u16,
    /// Optional password, sent as the api-key header
    pub password: Option<String>,
    /// Logical database number
    pub database: u32,
    /// Collection name holding all records
    pub collection: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 6333,
            password: None,
            database: 0,
            collection: "knowledge".to_string(),
            timeout_secs: 10,
        }
    }
}
