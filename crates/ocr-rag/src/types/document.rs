//! Document and file-kind types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extraction paths, detected from the file extension
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// PDF document: rasterize each page, OCR each page
    Pdf,
    /// Raster image: OCR the whole image directly
    Image,
    /// Anything else: best-effort lossy UTF-8 decode
    Text,
}

impl FileKind {
    /// Detect the extraction path from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "jpg" | "jpeg" | "png" | "webp" => Self::Image,
            _ => Self::Text,
        }
    }
}

/// The unit of storage: extracted text plus an open metadata bag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Extracted text (non-empty for stored documents)
    pub text: String,
    /// String-keyed metadata with caller-defined scalar values
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Document {
    /// Create a document with explicit metadata
    pub fn new(text: String, metadata: Map<String, Value>) -> Self {
        Self { text, metadata }
    }

    /// Create a document, defaulting metadata to `{"source": url}` when the
    /// caller supplies none (an empty map counts as none)
    pub fn from_extraction(
        text: String,
        source_url: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        let metadata = match metadata {
            Some(map) if !map.is_empty() => map,
            _ => {
                let mut map = Map::new();
                map.insert(
                    "source".to_string(),
                    Value::String(source_url.to_string()),
                );
                map
            }
        };
        Self { text, metadata }
    }
}
