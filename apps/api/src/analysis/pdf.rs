//! Resume text extraction from PDF documents.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("File not found at path: {0}")]
    NotFound(String),

    #[error("Error extracting PDF text: {0}")]
    Extraction(String),

    #[error("PDF contains no extractable text")]
    Empty,
}

/// Extracts the text of every page of the PDF at `path`, trimmed.
pub fn extract_pdf_text(path: &Path) -> Result<String, PdfError> {
    if !path.is_file() {
        return Err(PdfError::NotFound(path.display().to_string()));
    }
    let text =
        pdf_extract::extract_text(path).map_err(|e| PdfError::Extraction(e.to_string()))?;
    debug!("Extracted {} chars from {}", text.len(), path.display());
    non_empty(text)
}

/// Extracts text from an in-memory PDF (e.g. a multipart upload).
pub fn extract_pdf_bytes(bytes: &[u8]) -> Result<String, PdfError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;
    non_empty(text)
}

fn non_empty(text: String) -> Result<String, PdfError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(PdfError::Empty)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = extract_pdf_text(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, PdfError::NotFound(_)));
        assert!(err.to_string().contains("/definitely/not/here.pdf"));
    }

    #[test]
    fn test_garbage_bytes_fail_extraction() {
        let err = extract_pdf_bytes(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Extraction(_)));
    }

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty("  hello \n".to_string()).unwrap(), "hello");
        assert!(matches!(non_empty(" \n ".to_string()), Err(PdfError::Empty)));
    }
}
