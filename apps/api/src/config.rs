use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::analysis::keywords::DEFAULT_MAX_KEYWORDS;
use crate::analysis::report::DEFAULT_REPORT_PATH;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, advice comes from the LLM advisor.
    pub anthropic_api_key: Option<String>,
    pub report_path: PathBuf,
    pub max_keywords: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the process env in production).
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            report_path: lookup("REPORT_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_path),
            max_keywords: match lookup("MAX_KEYWORDS") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_KEYWORDS must be a non-negative integer")?,
                None => defaults.max_keywords,
            },
            port: match lookup("PORT") {
                Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}
