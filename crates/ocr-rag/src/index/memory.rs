//! Ephemeral in-memory vector store
//!
//! Startup fallback when the remote store is unreachable. Nothing persists
//! across restarts; similarity is brute-force cosine over all records.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::QueryMatch;

use super::VectorStore;

struct MemoryRecord {
    vector: Vec<f32>,
    text: String,
    metadata: Map<String, Value>,
}

/// Brute-force in-memory store
#[derive(Default)]
pub struct MemoryVectorStore {
    records: RwLock<Vec<MemoryRecord>>,
}

impl MemoryVectorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn insert(
        &self,
        vector: Vec<f32>,
        text: String,
        metadata: Map<String, Value>,
    ) -> Result<()> {
        self.records.write().push(MemoryRecord {
            vector,
            text,
            metadata,
        });
        Ok(())
    }

    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        let records = self.records.read();
        let mut matches: Vec<QueryMatch> = records
            .iter()
            .map(|record| QueryMatch {
                text: record.text.clone(),
                score: cosine_similarity(vector, &record.vector),
                metadata: record.metadata.clone(),
            })
            .collect();

        // Sort by similarity (highest first)
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(matches.into_iter().take(top_k).collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Cosine similarity with a zero-vector guard
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
