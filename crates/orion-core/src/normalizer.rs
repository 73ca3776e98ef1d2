//! Query normalization: clean, case-fold, tokenize, drop stopwords, stem
//!
//! The stopword set and the stemmer are process-wide and read-only. They are
//! built on first use (or eagerly through [`Normalizer::init`]) and live until
//! the process exits.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;

static STRIP_RE: OnceLock<Regex> = OnceLock::new();
static WORD_RE: OnceLock<Regex> = OnceLock::new();
static SHARED: OnceLock<Normalizer> = OnceLock::new();

/// English stopwords (NLTK list). Entries with apostrophes are left out since
/// the cleaning step removes apostrophes before the lookup.
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Stems with Snowball English (Porter2), not the 1980 Porter algorithm used
/// by NLTK's `PorterStemmer`. The two disagree on some words ("fairly" is
/// "fair" here, "fairli" under Porter), so index terms must be stemmed with
/// this same algorithm for queries to match them.
pub struct Normalizer {
    stopwords: HashSet<&'static str>,
    stemmer: Stemmer,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().copied().collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Process-wide instance
    pub fn shared() -> &'static Normalizer {
        SHARED.get_or_init(Normalizer::new)
    }

    /// Build the shared resources up front so the first query does not pay for it
    pub fn init() {
        strip_re();
        word_re();
        Self::shared();
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Turn raw query text into stemmed tokens. Order and duplicates are kept.
    pub fn normalize(&self, raw: &str) -> Vec<String> {
        let cleaned = strip_re().replace_all(raw, "").to_lowercase();

        word_re()
            .find_iter(&cleaned)
            .map(|m| m.as_str())
            .filter(|token| self.keep(token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect()
    }

    fn keep(&self, token: &str) -> bool {
        if self.is_stopword(token) {
            return false;
        }
        // single digits carry no signal
        let numeric = token.chars().all(|c| c.is_ascii_digit());
        !numeric || token.len() > 1
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("stopwords", &self.stopwords.len())
            .field("stemmer", &"english")
            .finish()
    }
}

fn strip_re() -> &'static Regex {
    STRIP_RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9\s]").unwrap())
}

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"\b\w+\b").unwrap())
}
