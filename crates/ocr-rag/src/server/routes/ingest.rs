//! Parse and ingestion endpoints

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::ingestion::IngestReport;
use crate::server::state::AppState;

/// POST /parse - Fetch a file and extract its text without indexing it
pub async fn parse_file(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<Value>> {
    let text = state.ingestor().parse(&request.file_url).await?;

    Ok(Json(json!({
        "status": "success",
        "extracted_text": text,
    })))
}

/// POST /ingest/file - Fetch a file, extract its text, and index it
pub async fn ingest_file(
    State(state): State<AppState>,
    Json(request): Json<IngestFileRequest>,
) -> Result<Json<IngestReport>> {
    let report = state
        .ingestor()
        .ingest(&request.file_url, request.metadata)
        .await?;

    Ok(Json(report))
}

/// Request body for /parse
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    /// URL of the file to fetch
    pub file_url: String,
}

/// Request body for /ingest/file
#[derive(Debug, Deserialize)]
pub struct IngestFileRequest {
    /// URL of the file to fetch
    pub file_url: String,
    /// Payload stored with the document; defaults to `{"source": file_url}`
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}
