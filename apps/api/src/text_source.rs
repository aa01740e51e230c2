//! Document text extraction — the boundary between uploaded bytes and the
//! text-only profile pipeline.
//!
//! `AppState` holds an `Arc<dyn TextSource>`; the default is `PdfTextSource`.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;

/// Turns one uploaded document into one text blob.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn extract_text(&self, document: Bytes) -> Result<String, AppError>;
}

/// PDF decoder backed by `pdf-extract`. Decoding is CPU-bound and runs on the
/// blocking pool; a decoder panic is reported like any other decode failure.
pub struct PdfTextSource;

#[async_trait]
impl TextSource for PdfTextSource {
    async fn extract_text(&self, document: Bytes) -> Result<String, AppError> {
        if document.is_empty() {
            return Err(AppError::Validation("Uploaded document is empty".to_string()));
        }

        let size = document.len();
        let decoded = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&document))
            .await
            .map_err(|e| {
                warn!("PDF decoder aborted: {e}");
                AppError::UnprocessableEntity("Could not read the uploaded PDF".to_string())
            })?;

        let text = decoded.map_err(|e| {
            warn!("PDF decoding failed: {e}");
            AppError::UnprocessableEntity(format!("Could not read the uploaded PDF: {e}"))
        })?;

        info!(bytes = size, chars = text.chars().count(), "Decoded PDF document");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_document_is_validation_error() {
        let err = PdfTextSource.extract_text(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_are_unprocessable() {
        let err = PdfTextSource
            .extract_text(Bytes::from_static(b"plain text, not a PDF"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
