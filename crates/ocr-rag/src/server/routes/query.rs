//! Similarity query endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::QueryMatch;

/// POST /query - Embed the query text and return the closest documents
pub async fn query_index(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    tracing::info!("Query: \"{}\"", request.query);

    let results = state
        .query_engine()
        .query(&request.query, request.top_k)
        .await?;

    Ok(Json(QueryResponse {
        query: request.query,
        results,
    }))
}

/// Request body for /query
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Text to search for
    pub query: String,
    /// Maximum number of matches to return (default 5)
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Response body for /query
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// The query echoed back
    pub query: String,
    /// Closest matches, descending by similarity
    pub results: Vec<QueryMatch>,
}
