//! Ingestion orchestration: fetch, extract, wrap, store
//!
//! `parse` is the read-only half (fetch + extract); `ingest` runs the same
//! extraction and stores the result as one document, skipping storage when
//! nothing was extracted.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::extraction::TextExtractor;
use crate::index::VectorIndex;
use crate::types::Document;

/// Terminal states of one ingestion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    /// Text extracted and stored
    Success,
    /// Nothing extracted; nothing stored
    Empty,
}

/// Outcome report echoed back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Terminal status
    pub status: IngestStatus,
    /// Extracted text, echoed for visibility
    pub extracted_text: String,
    /// Human-readable summary
    pub message: String,
}

/// Fetch-extract-store pipeline
pub struct Ingestor {
    extractor: Arc<TextExtractor>,
    index: Arc<VectorIndex>,
}

impl Ingestor {
    /// Create a new ingestor over a shared extractor and index
    pub fn new(extractor: Arc<TextExtractor>, index: Arc<VectorIndex>) -> Self {
        Self { extractor, index }
    }

    /// Fetch and extract only; never touches the index
    pub async fn parse(&self, url: &str) -> Result<String> {
        self.extractor.extract_from_url(url).await
    }

    /// Fetch, extract, and store as one document
    ///
    /// Empty extraction short-circuits with status `empty` so the index
    /// never stores empty documents.
    pub async fn ingest(
        &self,
        url: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<IngestReport> {
        let text = self.extractor.extract_from_url(url).await?;

        if text.is_empty() {
            tracing::warn!("No text extracted from {}", url);
            return Ok(IngestReport {
                status: IngestStatus::Empty,
                extracted_text: String::new(),
                message: "No text extracted.".to_string(),
            });
        }

        let document = Document::from_extraction(text, url, metadata);
        self.index.insert(&document).await?;
        tracing::info!(
            "Indexed document from {} ({} chars)",
            url,
            document.text.len()
        );

        Ok(IngestReport {
            status: IngestStatus::Success,
            extracted_text: document.text,
            message: "File indexed.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use httpmock::{Method::GET, MockServer};
    use parking_lot::Mutex;

    use crate::config::FetchConfig;
    use crate::error::Error;
    use crate::index::VectorStore;
    use crate::providers::{EmbeddingProvider, OcrProvider};
    use crate::types::QueryMatch;

    struct NoopOcr;

    #[async_trait]
    impl OcrProvider for NoopOcr {
        async fn image_to_text(&self, _image: &[u8]) -> Result<String> {
            Err(Error::ocr("not under test"))
        }

        fn name(&self) -> &str {
            "noop"
        }
    }

    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32, 1.0])
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    /// Store double that records inserted (text, metadata) pairs
    struct RecordingStore {
        records: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
    }

    #[async_trait]
    impl VectorStore for RecordingStore {
        async fn insert(
            &self,
            _vector: Vec<f32>,
            text: String,
            metadata: Map<String, Value>,
        ) -> Result<()> {
            self.records.lock().push((text, metadata));
            Ok(())
        }

        async fn search(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<QueryMatch>> {
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn ingestor_with_records() -> (Ingestor, Arc<Mutex<Vec<(String, Map<String, Value>)>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let store = RecordingStore {
            records: Arc::clone(&records),
        };
        let extractor = Arc::new(TextExtractor::new(
            &FetchConfig::default(),
            Arc::new(NoopOcr),
        ));
        let index = Arc::new(VectorIndex::with_store(
            Arc::new(StubEmbedder),
            Box::new(store),
        ));
        (Ingestor::new(extractor, index), records)
    }

    #[tokio::test]
    async fn ingest_stores_document_and_reports_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/a.txt");
                then.status(200).body("hello corpus");
            })
            .await;

        let (ingestor, records) = ingestor_with_records();
        let url = format!("{}/a.txt", server.base_url());
        let report = ingestor.ingest(&url, None).await.unwrap();

        assert_eq!(report.status, IngestStatus::Success);
        assert_eq!(report.extracted_text, "hello corpus");
        assert_eq!(report.message, "File indexed.");
        assert_eq!(records.lock().len(), 1);
    }

    #[tokio::test]
    async fn empty_extraction_skips_storage() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/blank.txt");
                then.status(200).body("   \n\t  ");
            })
            .await;

        let (ingestor, records) = ingestor_with_records();
        let url = format!("{}/blank.txt", server.base_url());
        let report = ingestor.ingest(&url, None).await.unwrap();

        assert_eq!(report.status, IngestStatus::Empty);
        assert_eq!(report.extracted_text, "");
        assert_eq!(report.message, "No text extracted.");
        assert!(records.lock().is_empty());
    }

    #[tokio::test]
    async fn binary_payload_reports_empty_and_skips_storage() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/junk.bin");
                then.status(200).body([0xFFu8, 0xFE, 0xC0, 0xC1].as_slice());
            })
            .await;

        let (ingestor, records) = ingestor_with_records();
        let url = format!("{}/junk.bin", server.base_url());
        let report = ingestor.ingest(&url, None).await.unwrap();

        assert_eq!(report.status, IngestStatus::Empty);
        assert_eq!(report.extracted_text, "");
        assert_eq!(report.message, "No text extracted.");
        assert!(records.lock().is_empty());
    }

    #[tokio::test]
    async fn missing_metadata_defaults_to_source_url() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/a.txt");
                then.status(200).body("content");
            })
            .await;

        let (ingestor, records) = ingestor_with_records();
        let url = format!("{}/a.txt", server.base_url());
        ingestor.ingest(&url, None).await.unwrap();

        let records = records.lock();
        let (_, metadata) = &records[0];
        assert_eq!(
            metadata.get("source").and_then(|v| v.as_str()),
            Some(url.as_str())
        );
    }

    #[tokio::test]
    async fn caller_metadata_is_stored_verbatim() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/a.txt");
                then.status(200).body("content");
            })
            .await;

        let mut metadata = Map::new();
        metadata.insert("topic".to_string(), Value::String("physics".into()));

        let (ingestor, records) = ingestor_with_records();
        let url = format!("{}/a.txt", server.base_url());
        ingestor.ingest(&url, Some(metadata)).await.unwrap();

        let records = records.lock();
        let (_, stored) = &records[0];
        assert_eq!(
            stored.get("topic").and_then(|v| v.as_str()),
            Some("physics")
        );
        assert!(stored.get("source").is_none());
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone.txt");
                then.status(404);
            })
            .await;

        let (ingestor, records) = ingestor_with_records();
        let url = format!("{}/gone.txt", server.base_url());
        let err = ingestor.ingest(&url, None).await.unwrap_err();

        assert!(matches!(err, Error::Fetch(_)));
        assert!(records.lock().is_empty());
    }

    #[tokio::test]
    async fn parse_never_touches_the_index() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/a.txt");
                then.status(200).body("read only");
            })
            .await;

        let (ingestor, records) = ingestor_with_records();
        let url = format!("{}/a.txt", server.base_url());
        let text = ingestor.parse(&url).await.unwrap();

        assert_eq!(text, "read only");
        assert!(records.lock().is_empty());
    }
}
