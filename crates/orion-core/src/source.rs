//! Read-side capabilities the engine needs from storage, plus in-memory doubles

use std::collections::{BTreeMap, BTreeSet};

use crate::error::RetrievalError;
use crate::types::{CorpusSnapshot, DocumentId, Posting};

/// Looks up postings for a set of terms.
///
/// An empty `terms` set, or terms with no postings, yield an empty vector.
/// Every call must read from a single consistent snapshot.
pub trait IndexReader: Send + Sync {
    fn fetch_postings(&self, terms: &BTreeSet<String>) -> Result<Vec<Posting>, RetrievalError>;
}

/// Corpus-wide counts used for IDF and length normalization
pub trait CorpusStatistics: Send + Sync {
    fn total_document_count(&self) -> Result<u64, RetrievalError>;

    /// Mean document length; 0 for an empty corpus
    fn average_document_length(&self) -> Result<f64, RetrievalError>;
}

impl<T: IndexReader + ?Sized> IndexReader for &T {
    fn fetch_postings(&self, terms: &BTreeSet<String>) -> Result<Vec<Posting>, RetrievalError> {
        (**self).fetch_postings(terms)
    }
}

impl<T: CorpusStatistics + ?Sized> CorpusStatistics for &T {
    fn total_document_count(&self) -> Result<u64, RetrievalError> {
        (**self).total_document_count()
    }

    fn average_document_length(&self) -> Result<f64, RetrievalError> {
        (**self).average_document_length()
    }
}

/// Fixed statistics, independent of any index
impl CorpusStatistics for CorpusSnapshot {
    fn total_document_count(&self) -> Result<u64, RetrievalError> {
        Ok(self.total_documents)
    }

    fn average_document_length(&self) -> Result<f64, RetrievalError> {
        Ok(self.average_document_length)
    }
}

/// Inverted index held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    lengths: BTreeMap<DocumentId, u32>,
    postings: BTreeMap<(String, DocumentId), Posting>,
    failing: BTreeSet<&'static str>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document and its term positions, replacing any earlier entry
    pub fn add_document<I, S>(&mut self, document_id: DocumentId, length: u32, terms: I)
    where
        I: IntoIterator<Item = (S, Vec<u32>)>,
        S: Into<String>,
    {
        self.postings.retain(|(_, id), _| *id != document_id);
        self.lengths.insert(document_id, length);
        for (term, positions) in terms {
            let term = term.into();
            let posting = Posting::new(term.clone(), document_id, positions.len() as u32, length)
                .with_positions(positions);
            self.postings.insert((term, document_id), posting);
        }
    }

    /// Make the named operation fail on every call
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn document_count(&self) -> usize {
        self.lengths.len()
    }

    fn check(&self, operation: &'static str) -> Result<(), RetrievalError> {
        if self.failing.contains(operation) {
            return Err(RetrievalError::new(operation, "index unavailable"));
        }
        Ok(())
    }
}

impl IndexReader for MemoryIndex {
    fn fetch_postings(&self, terms: &BTreeSet<String>) -> Result<Vec<Posting>, RetrievalError> {
        self.check("fetch_postings")?;
        Ok(self
            .postings
            .values()
            .filter(|p| terms.contains(&p.term))
            .cloned()
            .collect())
    }
}

impl CorpusStatistics for MemoryIndex {
    fn total_document_count(&self) -> Result<u64, RetrievalError> {
        self.check("total_document_count")?;
        Ok(self.lengths.len() as u64)
    }

    fn average_document_length(&self) -> Result<f64, RetrievalError> {
        self.check("average_document_length")?;
        if self.lengths.is_empty() {
            return Ok(0.0);
        }
        let total: u64 = self.lengths.values().map(|&len| len as u64).sum();
        Ok(total as f64 / self.lengths.len() as f64)
    }
}
