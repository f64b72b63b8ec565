//! OpenAI-compatible clients for vision OCR and text embeddings
//!
//! Both speak the `/chat/completions` and `/embeddings` wire protocol, which
//! covers DashScope compatible mode, Ollama's OpenAI endpoint, and OpenAI
//! itself.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::{EmbeddingConfig, OcrConfig};
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::ocr::OcrProvider;

/// Fixed instruction sent with every OCR request
const OCR_INSTRUCTION: &str =
    "Extract all text from this image, preserving the original paragraph structure.";

/// Vision OCR client against an OpenAI-compatible chat-completion endpoint
pub struct OpenAiOcr {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiOcr {
    /// Create a new OCR client
    pub fn new(config: &OcrConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl OcrProvider for OpenAiOcr {
    async fn image_to_text(&self, image: &[u8]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart {
                        kind: "text".to_string(),
                        text: Some(OCR_INSTRUCTION.to_string()),
                        image_url: None,
                    },
                    ContentPart {
                        kind: "image_url".to_string(),
                        text: None,
                        image_url: Some(ImageUrl {
                            url: data_url(image),
                        }),
                    },
                ],
            }],
        };

        let mut req = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::ocr(format!("OCR request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ocr(format!(
                "OCR service returned HTTP {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::ocr(format!("Failed to parse OCR response: {}", e)))?;

        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::ocr("OCR response contained no choices"))?;

        tracing::debug!(model = %self.model, chars = text.len(), "OCR page recognized");
        Ok(text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Embedding client against an OpenAI-compatible embeddings endpoint
pub struct OpenAiEmbedder {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    dimensions: usize,
    max_retries: u32,
}

impl OpenAiEmbedder {
    /// Create a new embedding client with retry support
    pub fn new(config: &EmbeddingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            dimensions: config.dimensions,
            max_retries: config.max_retries,
        }
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Embedding request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::embedding("Unknown error")))
    }

    async fn embed_once(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingsRequest {
            model: self.model.clone(),
            input: vec![text.to_string()],
        };

        let mut req = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!(
                "Embedding service returned HTTP {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("Failed to parse embedding response: {}", e)))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::embedding("Embedding response contained no data"))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.retry_request(|| self.embed_once(text)).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Build the data URL embedding the image bytes
fn data_url(image: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(image))
}

// ============================================================================
// API Request/Response types
// ============================================================================

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<ImageUrl>,
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    fn ocr_config(base_url: String) -> OcrConfig {
        OcrConfig {
            base_url,
            ..OcrConfig::default()
        }
    }

    fn embedding_config(base_url: String) -> EmbeddingConfig {
        EmbeddingConfig {
            base_url,
            max_retries: 0,
            ..EmbeddingConfig::default()
        }
    }

    #[test]
    fn data_url_has_jpeg_prefix() {
        let url = data_url(&[0xFF, 0xD8, 0xFF]);
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }

    #[tokio::test]
    async fn image_to_text_returns_model_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [{"message": {"content": "hello world"}}]
                }));
            })
            .await;

        let ocr = OpenAiOcr::new(&ocr_config(server.base_url()));
        let text = ocr.image_to_text(&[0xFF, 0xD8, 0xFF]).await.expect("ocr");

        mock.assert();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn image_to_text_surfaces_service_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(503).body("overloaded");
            })
            .await;

        let ocr = OpenAiOcr::new(&ocr_config(server.base_url()));
        let result = ocr.image_to_text(&[0xFF, 0xD8, 0xFF]).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("503"));
    }

    #[tokio::test]
    async fn embed_parses_vector() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/embeddings");
                then.status(200).json_body(json!({
                    "data": [{"embedding": [0.1, 0.2, 0.3]}]
                }));
            })
            .await;

        let embedder = OpenAiEmbedder::new(&embedding_config(server.base_url()));
        let vector = embedder.embed("hello").await.expect("embed");

        mock.assert();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn embed_surfaces_service_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/embeddings");
                then.status(500).body("overloaded");
            })
            .await;

        let embedder = OpenAiEmbedder::new(&embedding_config(server.base_url()));
        assert!(embedder.embed("hello").await.is_err());
    }
}
