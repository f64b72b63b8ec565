//! OCR provider trait for image-to-text recognition

use async_trait::async_trait;
use crate::error::Result;

/// Trait for recognizing text in raster images
///
/// Implementations:
/// - `OpenAiOcr`: vision chat-completion endpoint (qwen-vl-ocr, llava)
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Extract text from one image (JPEG/PNG/WebP bytes)
    ///
    /// Failures propagate to the caller; the extraction layer decides
    /// whether a failed page degrades to empty text.
    async fn image_to_text(&self, image: &[u8]) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
