//! Vector index: embedding and storage behind one process-wide handle
//!
//! `VectorIndex` owns the embedding provider and a storage backend. The
//! backend is the remote store when reachable and a fresh in-memory store
//! otherwise, so callers always get a usable handle.

pub mod memory;
pub mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::providers::EmbeddingProvider;
use crate::types::{Document, QueryMatch};

pub use memory::MemoryVectorStore;
pub use rest::RestVectorStore;

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `RestVectorStore`: remote Qdrant-style HTTP store
/// - `MemoryVectorStore`: ephemeral startup fallback
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Append one record. Every call creates a new record, identical text
    /// included; there is no dedup or upsert.
    async fn insert(
        &self,
        vector: Vec<f32>,
        text: String,
        metadata: Map<String, Value>,
    ) -> Result<()>;

    /// Nearest-neighbor search returning at most `top_k` hits, descending
    /// by similarity
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Process-wide handle pairing one embedding model with the backing store
///
/// Documents and queries must go through the same handle so every stored
/// vector and every query vector come from the same model.
pub struct VectorIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Box<dyn VectorStore>,
}

impl VectorIndex {
    /// Connect to the configured store, falling back to a fresh in-memory
    /// index when the store is unreachable
    ///
    /// Never fails: the process stays up and serves an empty index rather
    /// than refusing to start.
    pub async fn connect(config: &StoreConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        let store: Box<dyn VectorStore> =
            match RestVectorStore::connect(config, embedder.dimensions()).await {
                Ok(store) => {
                    tracing::info!(
                        "Vector store connected: {}:{} collection={}",
                        config.host,
                        config.port,
                        config.collection
                    );
                    Box::new(store)
                }
                Err(e) => {
                    tracing::error!("Vector store connection failed: {}", e);
                    tracing::warn!(
                        "Falling back to an ephemeral in-memory index; nothing will persist"
                    );
                    Box::new(MemoryVectorStore::new())
                }
            };

        Self { embedder, store }
    }

    /// Build an index directly on top of a store
    pub fn with_store(embedder: Arc<dyn EmbeddingProvider>, store: Box<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Embed a document's text and append it to the collection
    pub async fn insert(&self, document: &Document) -> Result<()> {
        let vector = self.embedder.embed(&document.text).await?;
        self.store
            .insert(vector, document.text.clone(), document.metadata.clone())
            .await
    }

    /// Embed the query and return the `top_k` closest documents
    pub async fn similarity_search(&self, query: &str, top_k: usize) -> Result<Vec<QueryMatch>> {
        let vector = self.embedder.embed(query).await?;
        self.store.search(&vector, top_k).await
    }

    /// Name of the active storage backend
    pub fn backend(&self) -> &str {
        self.store.name()
    }
}
