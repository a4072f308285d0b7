//! Report Renderer: turns a match result plus free-text advice into a Markdown report.
//!
//! Rendering is pure; persisting is best-effort. A failed write never loses the report:
//! the caller always gets the rendered content back, with a warning attached.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub const DEFAULT_REPORT_PATH: &str = "resume_report.md";

const NONE_MATCHED: &str = "_None found_";
const NONE_MISSING: &str = "_None missing — great match!_";
const NO_SUGGESTIONS: &str = "_No suggestions provided._";
const NO_INSIGHTS: &str = "_No industry insights provided._";

const NEXT_STEPS: &str = "\
1. Add the missing keywords naturally into your resume (do not keyword-stuff)
2. Update your **Skills** section with missing technical tools
3. Rewrite bullet points in **Experience** to reflect missing competencies
4. Consider getting certified in the top missing skills
5. Re-run this analyzer after updating your resume to track improvement";

/// Score bands. Below 40 is poor, 40 up to 70 moderate, 70 and above strong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Poor,
    Moderate,
    Strong,
}

impl MatchBand {
    const MODERATE_FROM: f64 = 40.0;
    const STRONG_FROM: f64 = 70.0;

    pub fn classify(score: f64) -> Self {
        if score < Self::MODERATE_FROM {
            MatchBand::Poor
        } else if score < Self::STRONG_FROM {
            MatchBand::Moderate
        } else {
            MatchBand::Strong
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchBand::Poor => "Poor Match",
            MatchBand::Moderate => "Moderate Match",
            MatchBand::Strong => "Strong Match",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            MatchBand::Poor => "🔴",
            MatchBand::Moderate => "🟡",
            MatchBand::Strong => "🟢",
        }
    }
}

/// Everything the report needs. Borrowed so callers keep ownership of their data.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub candidate_name: &'a str,
    pub target_role: &'a str,
    pub match_score: f64,
    pub matched_keywords: &'a [String],
    pub missing_keywords: &'a [String],
    pub suggestions: &'a str,
    pub industry_insights: &'a str,
}

/// Result of rendering and persisting a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub content: String,
    pub saved_to: Option<PathBuf>,
    pub warning: Option<String>,
}

impl ReportOutcome {
    pub fn is_saved(&self) -> bool {
        self.saved_to.is_some()
    }
}

/// Renders the full Markdown report stamped with `generated_at`.
pub fn render_report(input: &ReportInput<'_>, generated_at: DateTime<Local>) -> String {
    let band = MatchBand::classify(input.match_score);
    let timestamp = generated_at.format("%Y-%m-%d %H:%M:%S");
    let matched = keyword_list(input.matched_keywords, NONE_MATCHED);
    let missing = keyword_list(input.missing_keywords, NONE_MISSING);
    let suggestions = or_placeholder(input.suggestions, NO_SUGGESTIONS);
    let insights = or_placeholder(input.industry_insights, NO_INSIGHTS);

    format!(
        r#"# Resume Analysis Report

**Candidate:** {candidate}
**Target Role:** {role}
**Generated:** {timestamp}

---

## ATS Match Score

{marker} **{score:.2}% — {label}**

> A score above 70% indicates a strong match with the job description.
> Scores below 40% suggest significant keyword gaps that need to be addressed.

---

## Matched Keywords

The following keywords from the job description were found in your resume:

{matched}

---

## Missing Keywords

The following keywords appear in the job description but are **not** in your resume.
Consider adding them where relevant and truthful:

{missing}

---

## Improvement Suggestions

{suggestions}

---

## Industry Insights

{insights}

---

## Next Steps

{next_steps}

---

*Report generated by Resume Analyzer*
"#,
        candidate = input.candidate_name,
        role = input.target_role,
        marker = band.marker(),
        score = input.match_score,
        label = band.label(),
        next_steps = NEXT_STEPS,
    )
}

/// Renders the report and writes it to `path`.
///
/// Write failures are downgraded to `warning`; `content` is always populated.
pub fn write_report(input: &ReportInput<'_>, path: &Path) -> ReportOutcome {
    let content = render_report(input, Local::now());

    match persist(&content, path) {
        Ok(()) => {
            info!("Report saved to {}", path.display());
            ReportOutcome {
                content,
                saved_to: Some(path.to_path_buf()),
                warning: None,
            }
        }
        Err(e) => {
            warn!("Could not save report to {}: {e}", path.display());
            ReportOutcome {
                content,
                saved_to: None,
                warning: Some(format!("Could not save file to '{}': {e}", path.display())),
            }
        }
    }
}

/// Writes through a temp file in the destination directory, then renames over `path`.
fn persist(content: &str, path: &Path) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn keyword_list(keywords: &[String], placeholder: &str) -> String {
    let lines: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| format!("- `{k}`"))
        .collect();

    if lines.is_empty() {
        placeholder.to_string()
    } else {
        lines.join("\n")
    }
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}

/// Splits a comma-separated keyword string, trimming and dropping blanks.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
