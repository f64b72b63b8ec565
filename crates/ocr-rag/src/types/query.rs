//! Query result types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of matches returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 5;

/// One similarity-search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMatch {
    /// Stored document text
    pub text: String,
    /// Cosine similarity against the query, higher is closer
    pub score: f32,
    /// Metadata stored alongside the document
    #[serde(default)]
    pub metadata: Map<String, Value>,
}
