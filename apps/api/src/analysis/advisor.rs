//! Advisor: pluggable source of the free-text sections of a report.
//!
//! Default: `KeywordAdvisor` (deterministic, built from the missing keywords).
//! With an API key: `LlmAdvisor` (Claude writes suggestions and industry insights).
//!
//! `AppState` holds an `Arc<dyn Advisor>`, chosen at startup from config.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::matching::MatchResult;
use crate::analysis::prompts::{ADVICE_PROMPT_TEMPLATE, ADVICE_SYSTEM};
use crate::analysis::report::MatchBand;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// How many missing keywords get individual treatment in advice and summaries.
const TOP_MISSING: usize = 3;

/// Free-text report sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub suggestions: String,
    pub industry_insights: String,
}

/// Everything an advisor may look at.
#[derive(Debug, Clone, Copy)]
pub struct AdviceRequest<'a> {
    pub candidate_name: &'a str,
    pub target_role: &'a str,
    pub match_result: &'a MatchResult,
}

#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(&self, request: AdviceRequest<'_>) -> Result<Advice, AppError>;

    /// Short label for logs and API responses.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordAdvisor
// ────────────────────────────────────────────────────────────────────────────

/// Rule-based advice. No network, same input gives the same output.
pub struct KeywordAdvisor;

#[async_trait]
impl Advisor for KeywordAdvisor {
    async fn advise(&self, request: AdviceRequest<'_>) -> Result<Advice, AppError> {
        Ok(keyword_advice(request))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

fn keyword_advice(request: AdviceRequest<'_>) -> Advice {
    let result = request.match_result;
    let missing = &result.missing_keywords;

    let suggestions = if missing.is_empty() {
        format!(
            "Your resume already covers every keyword extracted from the {} posting. \
             Focus on quantifying impact in your Experience bullets.",
            request.target_role
        )
    } else {
        let mut lines = vec!["### Priority keywords".to_string(), String::new()];
        for (i, kw) in missing.iter().take(TOP_MISSING).enumerate() {
            let placement = match i {
                0 => "Add to the Skills section and mention it in an Experience bullet point",
                1 => "Add to the Projects section with a brief description",
                _ => "Consider a certification or course that covers it",
            };
            lines.push(format!("{}. `{kw}` — {placement}", i + 1));
        }

        let rest: Vec<String> = missing
            .iter()
            .skip(TOP_MISSING)
            .map(|k| format!("`{k}`"))
            .collect();
        if !rest.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "Also worth covering where truthful: {}.",
                rest.join(", ")
            ));
        }
        lines.join("\n")
    };

    let band = MatchBand::classify(result.match_score);
    let industry_insights = format!(
        "- Keyword coverage: {} of {} job description keywords ({:.2}%, {}).\n\
         - ATS filters rank resumes on exact keyword overlap; mirror the posting's wording.",
        result.matched_count,
        result.total_jd_keywords,
        result.match_score,
        band.label()
    );

    Advice {
        suggestions,
        industry_insights,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAdvisor
// ────────────────────────────────────────────────────────────────────────────

/// Advice written by Claude from the match result.
pub struct LlmAdvisor(pub LlmClient);

#[async_trait]
impl Advisor for LlmAdvisor {
    async fn advise(&self, request: AdviceRequest<'_>) -> Result<Advice, AppError> {
        let prompt = build_advice_prompt(request);
        let system = format!("{ADVICE_SYSTEM} {JSON_ONLY_SYSTEM}");
        self.0
            .call_json::<Advice>(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Advice generation failed: {e}")))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn build_advice_prompt(request: AdviceRequest<'_>) -> String {
    let result = request.match_result;
    ADVICE_PROMPT_TEMPLATE
        .replace("{candidate_name}", request.candidate_name)
        .replace("{target_role}", request.target_role)
        .replace("{match_score}", &format!("{:.2}", result.match_score))
        .replace("{matched_keywords}", &result.matched_keywords.join(", "))
        .replace("{missing_keywords}", &result.missing_keywords.join(", "))
}

// ────────────────────────────────────────────────────────────────────────────
// Gap summary
// ────────────────────────────────────────────────────────────────────────────

/// Short plain-text summary of a gap analysis, pointing at the saved report.
pub fn summarize(result: &MatchResult, report_location: Option<&str>) -> String {
    let mut out = format!(
        "--- GAP ANALYSIS COMPLETE ---\n\
         Match Score: {:.2}%\n\
         Matched Keywords: {} found\n\
         Missing Keywords: {} to add\n",
        result.match_score, result.matched_count, result.missing_count
    );

    if !result.missing_keywords.is_empty() {
        out.push_str("\nTop Missing Keywords to Add First:\n");
        for (i, kw) in result.missing_keywords.iter().take(TOP_MISSING).enumerate() {
            out.push_str(&format!("{}. {kw}\n", i + 1));
        }
    }

    match report_location {
        Some(path) => out.push_str(&format!("\nFull report saved to: {path}\n")),
        None => out.push_str("\nReport could not be saved; content returned inline.\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::matching::score;

    fn result(resume: &[&str], jd: &[&str]) -> MatchResult {
        score(resume, jd).unwrap()
    }

    fn request(match_result: &MatchResult) -> AdviceRequest<'_> {
        AdviceRequest {
            candidate_name: "Grace Hopper",
            target_role: "Platform Engineer",
            match_result,
        }
    }

    #[tokio::test]
    async fn test_keyword_advisor_prioritises_missing() {
        let r = result(&["rust"], &["rust", "kafka", "helm", "terraform", "vault"]);
        let advice = KeywordAdvisor.advise(request(&r)).await.unwrap();
        assert!(advice.suggestions.contains("1. `helm`"));
        assert!(advice.suggestions.contains("2. `kafka`"));
        assert!(advice.suggestions.contains("3. `terraform`"));
        assert!(advice.suggestions.contains("`vault`"));
        assert!(advice.industry_insights.contains("1 of 5"));
        assert!(advice.industry_insights.contains("Poor Match"));
    }

    #[tokio::test]
    async fn test_keyword_advisor_full_coverage() {
        let r = result(&["rust", "go"], &["rust"]);
        let advice = KeywordAdvisor.advise(request(&r)).await.unwrap();
        assert!(advice.suggestions.contains("Platform Engineer"));
        assert!(advice.industry_insights.contains("Strong Match"));
    }

    #[test]
    fn test_keyword_advisor_backend_label() {
        assert_eq!(KeywordAdvisor.backend(), "keyword");
    }

    #[test]
    fn test_advice_prompt_fills_placeholders() {
        let r = result(&["python", "aws"], &["python", "aws", "docker"]);
        let prompt = build_advice_prompt(request(&r));
        assert!(prompt.contains("Candidate: Grace Hopper"));
        assert!(prompt.contains("Target role: Platform Engineer"));
        assert!(prompt.contains("66.67%"));
        assert!(prompt.contains("Matched keywords: aws, python"));
        assert!(prompt.contains("Missing keywords: docker"));
        assert!(!prompt.contains("{missing_keywords}"));
    }

    #[test]
    fn test_advice_deserializes_from_llm_json() {
        let json = r#"{"suggestions": "Add Docker", "industry_insights": "- Containers everywhere"}"#;
        let advice: Advice = serde_json::from_str(json).unwrap();
        assert_eq!(advice.suggestions, "Add Docker");
    }

    #[test]
    fn test_summarize_lists_top_three() {
        let r = result(&[], &["a1", "b2", "c3", "d4"]);
        let summary = summarize(&r, Some("resume_report.md"));
        assert!(summary.contains("Match Score: 0.00%"));
        assert!(summary.contains("Missing Keywords: 4 to add"));
        assert!(summary.contains("3. c3"));
        assert!(!summary.contains("d4"));
        assert!(summary.contains("Full report saved to: resume_report.md"));
    }

    #[test]
    fn test_summarize_without_saved_report() {
        let r = result(&["a1"], &["a1"]);
        let summary = summarize(&r, None);
        assert!(!summary.contains("Top Missing"));
        assert!(summary.contains("could not be saved"));
    }
}
