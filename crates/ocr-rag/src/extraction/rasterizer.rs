//! PDF page rasterization
//!
//! Renders each page of an in-memory PDF to a JPEG so the OCR service can
//! read scanned or image-only documents. Rendering is synchronous native
//! code, so it runs on the blocking thread pool.

use std::io::Cursor;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::error::{Error, Result};

/// Render resolution. Pinned rather than left to the library default so the
/// same document always produces the same rasters.
pub const RENDER_DPI: f32 = 150.0;

/// Render every page of a PDF to JPEG bytes, in page order
pub async fn pages_to_jpegs(pdf: Vec<u8>) -> Result<Vec<Vec<u8>>> {
    tokio::task::spawn_blocking(move || render_pages(&pdf))
        .await
        .map_err(|e| Error::internal(format!("Task join error: {}", e)))?
}

fn render_pages(pdf: &[u8]) -> Result<Vec<Vec<u8>>> {
    let pdfium = Pdfium::new(
        Pdfium::bind_to_system_library()
            .map_err(|e| Error::Rasterize(format!("Failed to bind PDF library: {}", e)))?,
    );

    // Document and pages are dropped at scope end, freeing native resources
    // even when a page in the middle fails.
    let document = pdfium
        .load_pdf_from_byte_slice(pdf, None)
        .map_err(|e| Error::Rasterize(format!("Failed to open PDF: {}", e)))?;

    let render_config = PdfRenderConfig::new().scale_page_by_factor(RENDER_DPI / 72.0);

    let mut jpegs = Vec::with_capacity(document.pages().len() as usize);
    for page in document.pages().iter() {
        let bitmap = page
            .render_with_config(&render_config)
            .map_err(|e| Error::Rasterize(format!("Failed to render page: {}", e)))?;

        // JPEG has no alpha channel; drop it before encoding
        let mut encoded = Vec::new();
        bitmap
            .as_image()
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
            .map_err(|e| Error::Rasterize(format!("Failed to encode page as JPEG: {}", e)))?;
        jpegs.push(encoded);
    }

    Ok(jpegs)
}
