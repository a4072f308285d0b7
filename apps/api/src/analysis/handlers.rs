//! Axum route handlers for the Analysis API.

use std::path::PathBuf;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::analysis::matching::{score_json, MatchResult};
use crate::analysis::pdf::extract_pdf_bytes;
use crate::analysis::pipeline::{run_analysis, AnalysisOutcome, AnalyzeRequest, ReportJob};
use crate::analysis::report::{split_keywords, ReportOutcome};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
    pub max_keywords: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_keywords_json: String,
    pub jd_keywords_json: String,
}

/// A keyword collection given either as a JSON array or a comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeywordField {
    List(Vec<String>),
    Csv(String),
}

impl Default for KeywordField {
    fn default() -> Self {
        KeywordField::List(Vec::new())
    }
}

impl KeywordField {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            KeywordField::List(items) => items,
            KeywordField::Csv(raw) => split_keywords(&raw),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub candidate_name: String,
    pub target_role: String,
    pub match_score: f64,
    #[serde(default)]
    pub matched_keywords: KeywordField,
    #[serde(default)]
    pub missing_keywords: KeywordField,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub industry_insights: String,
    pub output_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords
///
/// Ranked keywords for a block of text. Empty text yields an empty list.
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Json<KeywordsResponse> {
    let max = request.max_keywords.unwrap_or(state.config.max_keywords);
    Json(KeywordsResponse {
        keywords: state.extractor.extract(&request.text, max),
    })
}

/// POST /api/v1/match
///
/// Scores two JSON-encoded keyword arrays.
pub async fn handle_match(
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = score_json(&request.resume_keywords_json, &request.jd_keywords_json)?;
    Ok(Json(result))
}

/// POST /api/v1/report
///
/// Renders and saves a report. A failed save still returns 200 with `warning` set.
pub async fn handle_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportOutcome>, AppError> {
    if !(0.0..=100.0).contains(&request.match_score) {
        return Err(AppError::Validation(
            "match_score must be between 0 and 100".to_string(),
        ));
    }

    let path = request
        .output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| state.config.report_path.clone());

    let outcome = ReportJob {
        candidate_name: request.candidate_name,
        target_role: request.target_role,
        match_score: request.match_score,
        matched_keywords: request.matched_keywords.into_vec(),
        missing_keywords: request.missing_keywords.into_vec(),
        suggestions: request.suggestions,
        industry_insights: request.industry_insights,
        path,
    }
    .run()
    .await?;

    Ok(Json(outcome))
}

/// POST /api/v1/resumes/extract
///
/// Multipart upload with a `file` field holding a PDF; returns its text.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let bytes: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        let text = tokio::task::spawn_blocking(move || extract_pdf_bytes(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF task failed: {e}")))??;

        return Ok(Json(ExtractResponse { text }));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// POST /api/v1/analyze
///
/// Full pipeline: keywords → score → advice → report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let outcome = run_analysis(
        &state.extractor,
        state.advisor.as_ref(),
        &state.config,
        request,
    )
    .await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_field_accepts_array() {
        let field: KeywordField = serde_json::from_str(r#"["rust", "go"]"#).unwrap();
        assert_eq!(field.into_vec(), vec!["rust", "go"]);
    }

    #[test]
    fn test_keyword_field_accepts_csv() {
        let field: KeywordField = serde_json::from_str(r#""rust, go,  ""#).unwrap();
        assert_eq!(field.into_vec(), vec!["rust", "go"]);
    }

    #[test]
    fn test_report_request_defaults_optional_sections() {
        let request: ReportRequest = serde_json::from_str(
            r#"{"candidate_name": "A", "target_role": "B", "match_score": 12.5}"#,
        )
        .unwrap();
        assert!(request.matched_keywords.into_vec().is_empty());
        assert!(request.suggestions.is_empty());
        assert!(request.output_path.is_none());
    }
}
