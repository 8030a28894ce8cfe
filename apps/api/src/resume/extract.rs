//! PDF text extraction. Thin wrapper over `pdf-extract`, run off the async
//! runtime because parsing is CPU-bound and the library can panic on
//! malformed documents.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("uploaded file is not a PDF")]
    NotPdf,

    #[error("failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("PDF extractor crashed on this document")]
    Panicked,
}

/// Returns true if the leading bytes carry the PDF signature.
pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(PDF_MAGIC)
}

/// Extracts the text of every page, concatenated, as a single blob.
/// Best-effort: the output may contain layout artifacts.
pub async fn extract_text(bytes: Bytes) -> Result<String, ExtractError> {
    if !is_pdf(&bytes) {
        return Err(ExtractError::NotPdf);
    }

    let size = bytes.len();
    let result =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

    match result {
        Ok(Ok(text)) => {
            debug!("Extracted {} chars from {size}-byte PDF", text.len());
            Ok(text)
        }
        Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
        Err(join_err) => {
            warn!("PDF extraction task failed: {join_err}");
            Err(ExtractError::Panicked)
        }
    }
}
