//! ocr-rag: document ingestion and retrieval service with OCR-backed extraction
//!
//! Fetches files over HTTP, extracts their text (rasterizing PDF pages and
//! running OCR on images), embeds the text, and answers vector similarity
//! queries over everything indexed so far.

pub mod config;
pub mod error;
pub mod extraction;
pub mod index;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Document, FileKind},
    query::QueryMatch,
};
