//! Typed records exchanged between the pipeline stages

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::normalizer::Normalizer;

/// Identifier of an indexed page
pub type DocumentId = i64;

/// A single (term, document) entry of the inverted index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub term: String,
    pub document_id: DocumentId,
    pub term_frequency: u32,
    /// Token offsets of `term` inside the document, ascending
    #[serde(default)]
    pub positions: Vec<u32>,
    pub document_length: u32,
}

impl Posting {
    pub fn new(
        term: impl Into<String>,
        document_id: DocumentId,
        term_frequency: u32,
        document_length: u32,
    ) -> Self {
        Self {
            term: term.into(),
            document_id,
            term_frequency,
            positions: Vec::new(),
            document_length,
        }
    }

    pub fn with_positions(mut self, positions: Vec<u32>) -> Self {
        self.positions = positions;
        self
    }
}

/// Relevance of one document for one query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentScore {
    pub document_id: DocumentId,
    pub score: f64,
}

/// Corpus-wide figures read once per query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    pub total_documents: u64,
    pub average_document_length: f64,
}

/// Raw query text and the tokens derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub raw: String,
    pub tokens: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str, normalizer: &Normalizer) -> Self {
        Self {
            raw: raw.to_string(),
            tokens: normalizer.normalize(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Distinct tokens, in a stable order
    pub fn term_set(&self) -> BTreeSet<String> {
        self.tokens.iter().cloned().collect()
    }
}
