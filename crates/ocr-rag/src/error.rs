//! Error types for the ingestion and retrieval service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source file fetch error (unreachable URL or non-2xx status)
    #[error("Failed to fetch file: {0}")]
    Fetch(String),

    /// OCR service error
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// PDF rasterization error
    #[error("Failed to rasterize PDF: {0}")]
    Rasterize(String),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector store error
    #[error("Vector store error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Create an OCR error
    pub fn ocr(message: impl Into<String>) -> Self {
        Self::Ocr(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::Fetch(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "fetch_error",
                msg.clone(),
            ),
            Error::Ocr(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "ocr_error", msg.clone()),
            Error::Rasterize(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "rasterize_error",
                msg.clone(),
            ),
            Error::Embedding(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "embedding_error",
                msg.clone(),
            ),
            Error::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                msg.clone(),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "http_error",
                err.to_string(),
            ),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
