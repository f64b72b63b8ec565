//! API routes for the ingestion and retrieval service

pub mod ingest;
pub mod query;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Liveness probe
        .route("/", get(health))
        // Extraction without indexing
        .route("/parse", post(ingest::parse_file))
        // Extraction plus indexing
        .route("/ingest/file", post(ingest::ingest_file))
        // Similarity search
        .route("/query", post(query::query_index))
}

/// GET / - Health check
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
