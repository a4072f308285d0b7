//! Match Scorer: set coverage of JD keywords by resume keywords.
//!
//! score = round(100 × |resume ∩ jd| / |jd|, 2)
//!
//! Both sides are treated as sets. Output lists are sorted so results diff cleanly.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("Invalid JSON input for {side} keywords: {reason}")]
    InvalidInput { side: KeywordSide, reason: String },

    #[error("Job description keywords list is empty.")]
    EmptyReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordSide {
    Resume,
    JobDescription,
}

impl std::fmt::Display for KeywordSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordSide::Resume => f.write_str("resume"),
            KeywordSide::JobDescription => f.write_str("job description"),
        }
    }
}

/// Outcome of comparing one resume against one JD.
///
/// `matched_keywords ∪ missing_keywords` is exactly the JD keyword set, and the two
/// lists never share an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: f64,
    pub total_jd_keywords: usize,
    pub matched_count: usize,
    pub missing_count: usize,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Scores resume keywords against JD keywords.
pub fn score<S: AsRef<str>>(resume: &[S], jd: &[S]) -> Result<MatchResult, MatchError> {
    let resume: BTreeSet<&str> = resume.iter().map(|s| s.as_ref()).collect();
    let jd: BTreeSet<&str> = jd.iter().map(|s| s.as_ref()).collect();

    if jd.is_empty() {
        return Err(MatchError::EmptyReference);
    }

    let matched: Vec<String> = jd.intersection(&resume).map(|s| s.to_string()).collect();
    let missing: Vec<String> = jd.difference(&resume).map(|s| s.to_string()).collect();

    Ok(MatchResult {
        match_score: round2(matched.len() as f64 / jd.len() as f64 * 100.0),
        total_jd_keywords: jd.len(),
        matched_count: matched.len(),
        missing_count: missing.len(),
        matched_keywords: matched,
        missing_keywords: missing,
    })
}

/// Scores two JSON arrays of strings.
pub fn score_json(resume_json: &str, jd_json: &str) -> Result<MatchResult, MatchError> {
    let resume = parse_keywords(resume_json, KeywordSide::Resume)?;
    let jd = parse_keywords(jd_json, KeywordSide::JobDescription)?;
    score(&resume, &jd)
}

fn parse_keywords(raw: &str, side: KeywordSide) -> Result<Vec<String>, MatchError> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| MatchError::InvalidInput {
        side,
        reason: e.to_string(),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
