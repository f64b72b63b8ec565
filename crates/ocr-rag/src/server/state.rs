//! Application state for the HTTP server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::extraction::TextExtractor;
use crate::index::VectorIndex;
use crate::ingestion::Ingestor;
use crate::providers::{OpenAiEmbedder, OpenAiOcr};
use crate::retrieval::QueryEngine;

/// Shared application state
///
/// Cheap to clone; every handler sees the same pipelines.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Fetch-extract-store pipeline
    ingestor: Ingestor,
    /// Similarity search over the index
    query_engine: QueryEngine,
}

impl AppState {
    /// Wire every provider from the configuration
    ///
    /// Never fails: an unreachable vector store is replaced by an ephemeral
    /// in-memory index so the service still comes up.
    pub async fn new(config: &RagConfig) -> Self {
        let ocr = Arc::new(OpenAiOcr::new(&config.ocr));
        tracing::info!("OCR provider initialized (model: {})", config.ocr.model);

        let extractor = Arc::new(TextExtractor::new(&config.fetch, ocr));

        let embedder = Arc::new(OpenAiEmbedder::new(&config.embedding));
        tracing::info!(
            "Embedding provider initialized (model: {}, {} dimensions)",
            config.embedding.model,
            config.embedding.dimensions
        );

        let index = Arc::new(VectorIndex::connect(&config.store, embedder).await);
        tracing::info!("Vector index ready (backend: {})", index.backend());

        let ingestor = Ingestor::new(extractor, Arc::clone(&index));
        let query_engine = QueryEngine::new(index);

        Self {
            inner: Arc::new(AppStateInner {
                ingestor,
                query_engine,
            }),
        }
    }

    /// Assemble state from prebuilt pipelines
    #[cfg(test)]
    pub(crate) fn from_parts(ingestor: Ingestor, query_engine: QueryEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                ingestor,
                query_engine,
            }),
        }
    }

    /// Get the ingestor
    pub fn ingestor(&self) -> &Ingestor {
        &self.inner.ingestor
    }

    /// Get the query engine
    pub fn query_engine(&self) -> &QueryEngine {
        &self.inner.query_engine
    }
}
