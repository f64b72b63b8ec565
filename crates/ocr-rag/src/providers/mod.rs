//! Provider abstractions for OCR and embeddings
//!
//! Trait-based so the extraction and index layers can swap between an
//! OpenAI-compatible cloud service and a local Ollama server.

pub mod embedding;
pub mod ocr;
pub mod openai;

pub use embedding::EmbeddingProvider;
pub use ocr::OcrProvider;
pub use openai::{OpenAiEmbedder, OpenAiOcr};
