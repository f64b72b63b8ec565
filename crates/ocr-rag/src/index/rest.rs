//! REST vector store client
//!
//! Speaks a Qdrant-style HTTP API with every route scoped under a logical
//! database number, so one server can host isolated namespaces:
//! `/databases/{db}/collections/{collection}/...`. The configured password,
//! when set, travels as the `api-key` header on every request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::types::QueryMatch;

use super::VectorStore;

/// Client bound to one collection of a remote vector store
pub struct RestVectorStore {
    client: Client,
    base_url: String,
    collection: String,
    api_key: Option<String>,
}

impl RestVectorStore {
    /// Connect and bind to the configured collection, creating it when absent
    ///
    /// Existing collections are never dropped or overwritten.
    pub async fn connect(config: &StoreConfig, dimensions: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = format!(
            "{}://{}:{}/databases/{}",
            config.scheme, config.host, config.port, config.database
        );

        let store = Self {
            client,
            base_url,
            collection: config.collection.clone(),
            api_key: config.password.clone(),
        };

        store.create_collection_if_missing(dimensions).await?;
        Ok(store)
    }

    async fn create_collection_if_missing(&self, dimensions: usize) -> Result<()> {
        if self.collection_exists().await? {
            tracing::debug!("Collection {} already exists", self.collection);
            return Ok(());
        }

        tracing::info!(
            "Creating collection {} (dimensions={})",
            self.collection,
            dimensions
        );
        let body = json!({
            "vectors": {
                "size": dimensions,
                "distance": "Cosine"
            }
        });

        let response = self
            .request(Method::PUT, &format!("collections/{}", self.collection))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::store(format!("Failed to create collection: {}", e)))?;

        self.ensure_success(response, "create collection").await
    }

    async fn collection_exists(&self) -> Result<bool> {
        let response = self
            .request(Method::GET, &format!("collections/{}", self.collection))
            .send()
            .await
            .map_err(|e| Error::store(format!("Store unreachable: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(Error::store(format!(
                    "Collection check returned HTTP {}: {}",
                    status, body
                )))
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let mut req = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            req = req.header("api-key", key);
        }
        req
    }

    async fn ensure_success(&self, response: reqwest::Response, action: &str) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::store(format!(
            "Failed to {}: HTTP {}: {}",
            action, status, body
        )))
    }
}

#[async_trait]
impl VectorStore for RestVectorStore {
    async fn insert(
        &self,
        vector: Vec<f32>,
        text: String,
        metadata: Map<String, Value>,
    ) -> Result<()> {
        // Text rides inside the payload next to the caller's metadata
        let mut payload = metadata;
        payload.insert("text".to_string(), Value::String(text));

        let body = json!({
            "points": [{
                "id": Uuid::new_v4().to_string(),
                "vector": vector,
                "payload": payload,
            }]
        });

        let response = self
            .request(
                Method::PUT,
                &format!("collections/{}/points", self.collection),
            )
            .query(&[("wait", true)])
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::store(format!("Insert request failed: {}", e)))?;

        self.ensure_success(response, "insert point").await
    }

    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        let body = json!({
            "query": vector,
            "limit": top_k,
            "with_payload": true,
        });

        let response = self
            .request(
                Method::POST,
                &format!("collections/{}/points/query", self.collection),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::store(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::store(format!(
                "Search returned HTTP {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::store(format!("Failed to parse search response: {}", e)))?;

        let matches = parsed
            .result
            .into_iter()
            .map(|point| {
                let mut payload = point.payload.unwrap_or_default();
                let text = match payload.remove("text") {
                    Some(Value::String(text)) => text,
                    _ => String::new(),
                };
                QueryMatch {
                    text,
                    score: point.score,
                    metadata: payload,
                }
            })
            .collect();

        Ok(matches)
    }

    fn name(&self) -> &str {
        "rest"
    }
}

// ============================================================================
// API Request/Response types
// ============================================================================

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    score: f32,
    payload: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{
        Method::{GET, POST, PUT},
        MockServer,
    };

    fn store_config(server: &MockServer) -> StoreConfig {
        StoreConfig {
            host: server.address().ip().to_string(),
            port: server.address().port(),
            collection: "docs".to_string(),
            database: 3,
            password: Some("hunter2".to_string()),
            ..StoreConfig::default()
        }
    }

    #[tokio::test]
    async fn connect_creates_missing_collection() {
        let server = MockServer::start_async().await;
        let exists = server
            .mock_async(|when, then| {
                when.method(GET).path("/databases/3/collections/docs");
                then.status(404);
            })
            .await;
        let create = server
            .mock_async(|when, then| {
                when.method(PUT).path("/databases/3/collections/docs");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;

        RestVectorStore::connect(&store_config(&server), 768)
            .await
            .expect("connect");

        exists.assert();
        create.assert();
    }

    #[tokio::test]
    async fn connect_keeps_existing_collection() {
        let server = MockServer::start_async().await;
        let exists = server
            .mock_async(|when, then| {
                when.method(GET).path("/databases/3/collections/docs");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;
        let create = server
            .mock_async(|when, then| {
                when.method(PUT).path("/databases/3/collections/docs");
                then.status(500);
            })
            .await;

        RestVectorStore::connect(&store_config(&server), 768)
            .await
            .expect("connect");

        exists.assert();
        create.assert_hits(0);
    }

    #[tokio::test]
    async fn insert_puts_point_with_payload() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/databases/3/collections/docs");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;
        let insert = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/databases/3/collections/docs/points")
                    .query_param("wait", "true")
                    .header("api-key", "hunter2");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;

        let store = RestVectorStore::connect(&store_config(&server), 768)
            .await
            .expect("connect");

        let mut metadata = Map::new();
        metadata.insert("source".to_string(), Value::String("http://x/a.pdf".into()));
        store
            .insert(vec![0.1, 0.2], "body".to_string(), metadata)
            .await
            .expect("insert");

        insert.assert();
    }

    #[tokio::test]
    async fn search_maps_payload_to_matches() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/databases/3/collections/docs");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;
        let query = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/databases/3/collections/docs/points/query");
                then.status(200).json_body(json!({
                    "result": [
                        {
                            "id": "1",
                            "score": 0.91,
                            "payload": {"text": "hello", "source": "http://x/a.pdf"}
                        },
                        {
                            "id": "2",
                            "score": 0.42,
                            "payload": {"text": "world", "source": "http://x/b.pdf"}
                        }
                    ]
                }));
            })
            .await;

        let store = RestVectorStore::connect(&store_config(&server), 768)
            .await
            .expect("connect");
        let matches = store.search(&[0.1, 0.2], 2).await.expect("search");

        query.assert();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text, "hello");
        assert!((matches[0].score - 0.91).abs() < f32::EPSILON);
        assert_eq!(
            matches[0].metadata.get("source").and_then(|v| v.as_str()),
            Some("http://x/a.pdf")
        );
        // Text is lifted out of the payload, not duplicated into metadata
        assert!(matches[0].metadata.get("text").is_none());
    }

    #[tokio::test]
    async fn search_surfaces_store_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/databases/3/collections/docs");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/databases/3/collections/docs/points/query");
                then.status(500).body("store exploded");
            })
            .await;

        let store = RestVectorStore::connect(&store_config(&server), 768)
            .await
            .expect("connect");
        let err = store.search(&[0.1], 5).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }
}
