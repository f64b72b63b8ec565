//! Text extraction from fetched source files
//!
//! The extractor downloads a file by URL and dispatches on its extension:
//! PDFs are rasterized page by page and OCR'd, raster images go straight to
//! OCR, and anything else is decoded as UTF-8 with undecodable bytes dropped.

pub mod rasterizer;

use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::future::join_all;
use reqwest::Client;

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::providers::OcrProvider;
use crate::types::FileKind;

/// Fetches source files and turns them into plain text
pub struct TextExtractor {
    client: Client,
    ocr: Arc<dyn OcrProvider>,
    max_file_bytes: usize,
}

impl TextExtractor {
    /// Create a new extractor
    pub fn new(config: &FetchConfig, ocr: Arc<dyn OcrProvider>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            ocr,
            max_file_bytes: config.max_file_bytes,
        }
    }

    /// Fetch a file and extract its text in one step
    pub async fn extract_from_url(&self, url: &str) -> Result<String> {
        tracing::info!("Extracting text from: {}", url);
        let bytes = self.fetch(url).await?;
        let text = self.extract(&bytes, &extension_from_url(url)).await?;
        tracing::info!("Extracted {} chars from {}", text.len(), url);
        Ok(text)
    }

    /// Fetch a source file, failing on unreachable URLs and non-2xx statuses
    ///
    /// The size limit is checked against the declared Content-Length and
    /// again as the body streams in, so an oversized file never sits fully
    /// in memory.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(format!("Failed to download file {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::fetch(format!(
                "Failed to download file {}: HTTP {}",
                url,
                response.status()
            )));
        }

        if let Some(length) = response.content_length() {
            if length > self.max_file_bytes as u64 {
                return Err(Error::fetch(format!(
                    "File {} exceeds size limit ({} > {} bytes)",
                    url, length, self.max_file_bytes
                )));
            }
        }

        // The declared length can be absent or wrong; count what arrives
        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::fetch(format!("Failed to read file body {}: {}", url, e)))?
        {
            if body.len() + chunk.len() > self.max_file_bytes {
                return Err(Error::fetch(format!(
                    "File {} exceeds size limit (> {} bytes)",
                    url, self.max_file_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }

    /// Extract plain text from raw bytes, dispatching on the file extension
    ///
    /// Returns trimmed text; an empty string is a valid result meaning
    /// nothing was extracted.
    pub async fn extract(&self, bytes: &[u8], extension: &str) -> Result<String> {
        let text = match FileKind::from_extension(extension) {
            FileKind::Pdf => self.extract_pdf(bytes).await?,
            FileKind::Image => self.ocr_or_empty(bytes).await,
            // Undecodable bytes are dropped, not replaced
            FileKind::Text => bytes.utf8_chunks().map(|chunk| chunk.valid()).collect(),
        };
        Ok(text.trim().to_string())
    }

    async fn extract_pdf(&self, bytes: &[u8]) -> Result<String> {
        let jpegs = rasterizer::pages_to_jpegs(bytes.to_vec()).await?;
        tracing::debug!("Rasterized {} pages", jpegs.len());
        Ok(self.ocr_pages(&jpegs).await)
    }

    /// OCR every page concurrently; output follows page order regardless of
    /// completion order
    async fn ocr_pages(&self, jpegs: &[Vec<u8>]) -> String {
        let pages = join_all(jpegs.iter().map(|jpeg| self.ocr_or_empty(jpeg))).await;
        pages.join("\n\n")
    }

    /// Fail-soft OCR: a failed page degrades to empty text instead of
    /// aborting the whole extraction
    async fn ocr_or_empty(&self, image: &[u8]) -> String {
        match self.ocr.image_to_text(image).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("OCR failed: {}", e);
                String::new()
            }
        }
    }
}

/// Extension from a URL, lower-cased, query string stripped
pub fn extension_from_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query.rsplit('.').next().unwrap_or("").to_lowercase()
}
