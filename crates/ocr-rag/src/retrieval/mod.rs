//! Query orchestration
//!
//! Thin layer over the index: the raw query text is embedded as-is, with no
//! stemming, filtering, or rewriting.

use std::sync::Arc;

use crate::error::Result;
use crate::index::VectorIndex;
use crate::types::{QueryMatch, DEFAULT_TOP_K};

/// Similarity search entry point
pub struct QueryEngine {
    index: Arc<VectorIndex>,
}

impl QueryEngine {
    /// Create a new query engine over a shared index
    pub fn new(index: Arc<VectorIndex>) -> Self {
        Self { index }
    }

    /// Return the `top_k` documents closest to the query text
    pub async fn query(&self, text: &str, top_k: Option<usize>) -> Result<Vec<QueryMatch>> {
        let top_k = top_k.unwrap_or(DEFAULT_TOP_K);
        tracing::debug!("Query (top_k={}): {}", top_k, text);
        self.index.similarity_search(text, top_k).await
    }
}
