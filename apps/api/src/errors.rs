use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::matching::MatchError;
use crate::analysis::pdf::PdfError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Match(e @ MatchError::InvalidInput { .. }) => {
                (StatusCode::BAD_REQUEST, "INVALID_KEYWORDS", e.to_string())
            }
            AppError::Match(e @ MatchError::EmptyReference) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_REFERENCE",
                e.to_string(),
            ),
            AppError::Pdf(e @ PdfError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "PDF_NOT_FOUND", e.to_string())
            }
            AppError::Pdf(e) => {
                tracing::warn!("PDF extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PDF_ERROR",
                    e.to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reference_maps_to_422() {
        let response = AppError::from(MatchError::EmptyReference).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("jd_text cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_pdf_maps_to_404() {
        let response = AppError::from(PdfError::NotFound("cv.pdf".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
