//! Keyword Extractor: ranks the salient terms of a resume or job description.
//!
//! Two signals feed one frequency table:
//! - single tokens (lowercased, stop words and short tokens dropped) count 1 per occurrence
//! - Title Case phrases ("Google Cloud Platform") count 2 per occurrence, biasing the
//!   ranking toward named tools and technologies
//!
//! Ranking is by descending weight, ties by first appearance. Fully deterministic.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

/// Default cap on the number of keywords returned.
pub const DEFAULT_MAX_KEYWORDS: usize = 40;

/// Tokens shorter than this are discarded.
const MIN_TOKEN_LEN: usize = 3;

/// Weight added per occurrence of a capitalized phrase.
const PHRASE_WEIGHT: u32 = 2;

/// Built-in English stop words.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "shall", "should", "may", "might", "must", "can", "could",
    "not", "no", "nor", "so", "yet", "both", "either", "neither", "each", "than", "then",
    "that", "this", "these", "those", "i", "you", "he", "she", "we", "they", "it", "me",
    "him", "her", "us", "them", "my", "your", "his", "its", "our", "their", "what", "which",
    "who", "whom", "when", "where", "why", "how", "all", "any", "few", "more", "most",
    "other", "some", "such", "only", "own", "same", "as", "if", "also", "into", "through",
    "during", "before", "after", "above", "below", "between", "out", "up", "about",
    "against", "while", "per", "etc",
];

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    // Letters first, then letters/digits and the symbols kept inside tech terms (c++, c#, node.js).
    TOKEN.get_or_init(|| Regex::new(r"\b\p{L}[\p{L}\p{N}+#.\-]*").expect("token regex is valid"))
}

fn phrase_regex() -> &'static Regex {
    static PHRASE: OnceLock<Regex> = OnceLock::new();
    PHRASE.get_or_init(|| {
        Regex::new(r"\b(?:[A-Z][a-z]+\s+){1,3}[A-Z][a-z]+\b").expect("phrase regex is valid")
    })
}

/// Insertion-ordered weight table. Order of first sighting is the tie-breaker.
#[derive(Default)]
struct WeightTable {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl WeightTable {
    fn add(&mut self, term: String, weight: u32) {
        match self.index.get(&term) {
            Some(&i) => self.entries[i].1 += weight,
            None => {
                self.index.insert(term.clone(), self.entries.len());
                self.entries.push((term, weight));
            }
        }
    }

    fn into_ranked(self, max: usize) -> Vec<String> {
        let mut entries = self.entries;
        // sort_by is stable: equal weights keep first-seen order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().take(max).map(|(term, _)| term).collect()
    }
}

/// Extracts ranked keywords from free text.
///
/// The stop-word table is fixed at construction; the extractor holds no other state and
/// can be shared freely.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(STOP_WORDS)
    }
}

impl KeywordExtractor {
    pub fn new(stop_words: &[&'static str]) -> Self {
        Self {
            stop_words: stop_words.iter().copied().collect(),
        }
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Returns at most `max` distinct lowercase keywords, highest weight first.
    /// Empty input yields an empty list.
    pub fn extract(&self, text: &str, max: usize) -> Vec<String> {
        if max == 0 || text.trim().is_empty() {
            return Vec::new();
        }

        let mut table = WeightTable::default();

        let lowered = text.to_lowercase();
        for m in token_regex().find_iter(&lowered) {
            let token = m.as_str().trim_end_matches(['.', '-']);
            if token.chars().count() < MIN_TOKEN_LEN || self.is_stop_word(token) {
                continue;
            }
            table.add(token.to_string(), 1);
        }

        for m in phrase_regex().find_iter(text) {
            let phrase = m
                .as_str()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            if self.is_stop_word(&phrase) {
                continue;
            }
            table.add(phrase, PHRASE_WEIGHT);
        }

        table.into_ranked(max)
    }
}
