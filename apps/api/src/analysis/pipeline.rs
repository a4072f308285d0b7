//! Analysis pipeline: one resume, one job description, one report.
//!
//! Flow: resolve resume text (inline or PDF) → extract keywords (resume, JD) →
//!       score → advisor → render + write report → outcome.
//!
//! Runs are independent: nothing is shared between them except the immutable extractor
//! and the advisor backend.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::advisor::{summarize, Advice, AdviceRequest, Advisor, KeywordAdvisor};
use crate::analysis::keywords::KeywordExtractor;
use crate::analysis::matching::{self, MatchResult};
use crate::analysis::pdf::extract_pdf_text;
use crate::analysis::report::{write_report, MatchBand, ReportInput, ReportOutcome};
use crate::config::Config;
use crate::errors::AppError;

/// Request body for a full analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub candidate_name: String,
    pub target_role: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Server-local path to a PDF resume. Used when `resume_text` is absent or blank.
    #[serde(default)]
    pub resume_pdf_path: Option<String>,
    pub jd_text: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub max_keywords: Option<usize>,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub run_id: Uuid,
    pub advisor_backend: String,
    pub resume_keywords: Vec<String>,
    pub jd_keywords: Vec<String>,
    pub match_result: MatchResult,
    pub band: MatchBand,
    pub advice: Advice,
    pub report: ReportOutcome,
    pub summary: String,
}

/// Owned report parameters for the blocking writer.
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub candidate_name: String,
    pub target_role: String,
    pub match_score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: String,
    pub industry_insights: String,
    pub path: PathBuf,
}

impl ReportJob {
    fn input(&self) -> ReportInput<'_> {
        ReportInput {
            candidate_name: &self.candidate_name,
            target_role: &self.target_role,
            match_score: self.match_score,
            matched_keywords: &self.matched_keywords,
            missing_keywords: &self.missing_keywords,
            suggestions: &self.suggestions,
            industry_insights: &self.industry_insights,
        }
    }

    /// Renders and writes the report on the blocking pool.
    pub async fn run(self) -> Result<ReportOutcome, AppError> {
        tokio::task::spawn_blocking(move || write_report(&self.input(), &self.path))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Report task failed: {e}")))
    }
}

/// Runs the full analysis pipeline.
pub async fn run_analysis(
    extractor: &KeywordExtractor,
    advisor: &dyn Advisor,
    config: &Config,
    request: AnalyzeRequest,
) -> Result<AnalysisOutcome, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.candidate_name.trim().is_empty() || request.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "candidate_name and target_role are required".to_string(),
        ));
    }

    let run_id = Uuid::new_v4();
    let max_keywords = request.max_keywords.unwrap_or(config.max_keywords);

    // Step 1: Resume text
    let resume_text = resolve_resume_text(&request).await?;
    info!("[{run_id}] Resume text resolved ({} chars)", resume_text.len());

    // Step 2: Keywords
    let resume_keywords = extractor.extract(&resume_text, max_keywords);
    let jd_keywords = extractor.extract(&request.jd_text, max_keywords);
    info!(
        "[{run_id}] Extracted {} resume keywords, {} JD keywords",
        resume_keywords.len(),
        jd_keywords.len()
    );

    // Step 3: Score
    let match_result = matching::score(&resume_keywords, &jd_keywords)?;
    let band = MatchBand::classify(match_result.match_score);
    info!(
        "[{run_id}] Match score {:.2}% ({})",
        match_result.match_score,
        band.label()
    );

    // Step 4: Advice, falling back to the deterministic advisor
    let advice_request = AdviceRequest {
        candidate_name: &request.candidate_name,
        target_role: &request.target_role,
        match_result: &match_result,
    };
    let (advice, advisor_backend) = match advisor.advise(advice_request).await {
        Ok(advice) => (advice, advisor.backend()),
        Err(e) => {
            warn!(
                "[{run_id}] Advisor '{}' failed, using keyword advice: {e}",
                advisor.backend()
            );
            (KeywordAdvisor.advise(advice_request).await?, KeywordAdvisor.backend())
        }
    };

    // Step 5: Report
    let path = request
        .output_path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.report_path.clone());
    let report = ReportJob {
        candidate_name: request.candidate_name.clone(),
        target_role: request.target_role.clone(),
        match_score: match_result.match_score,
        matched_keywords: match_result.matched_keywords.clone(),
        missing_keywords: match_result.missing_keywords.clone(),
        suggestions: advice.suggestions.clone(),
        industry_insights: advice.industry_insights.clone(),
        path,
    }
    .run()
    .await?;

    if !report.is_saved() {
        warn!("[{run_id}] Report not persisted; returning content inline");
    }
    let saved = report.saved_to.as_ref().map(|p| p.display().to_string());
    let summary = summarize(&match_result, saved.as_deref());

    Ok(AnalysisOutcome {
        run_id,
        advisor_backend: advisor_backend.to_string(),
        resume_keywords,
        jd_keywords,
        match_result,
        band,
        advice,
        report,
        summary,
    })
}

async fn resolve_resume_text(request: &AnalyzeRequest) -> Result<String, AppError> {
    if let Some(text) = request.resume_text.as_deref() {
        if !text.trim().is_empty() {
            return Ok(text.to_string());
        }
    }

    let Some(path) = request.resume_pdf_path.clone() else {
        return Err(AppError::Validation(
            "Provide resume_text or resume_pdf_path".to_string(),
        ));
    };

    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&PathBuf::from(path)))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF task failed: {e}")))??;
    Ok(text)
}
