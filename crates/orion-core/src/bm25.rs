//! BM25 scoring over fetched postings
//!
//! All intermediate tables (document frequency, IDF, per-document sums) are
//! built from the call's arguments and dropped when the call returns.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::Bm25Params;
use crate::types::{CorpusSnapshot, DocumentId, DocumentScore, Posting};

#[derive(Debug, Clone, Copy)]
pub struct Bm25Scorer {
    params: Bm25Params,
}

impl Bm25Scorer {
    pub fn new(params: Bm25Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// Score every document that has at least one posting for a query term.
    ///
    /// Postings for terms outside `terms` are ignored. Output is ordered by
    /// document id; use [`crate::rank`] to order by relevance.
    pub fn score(
        &self,
        terms: &BTreeSet<String>,
        postings: &[Posting],
        corpus: &CorpusSnapshot,
    ) -> Vec<DocumentScore> {
        let mut matching: Vec<&Posting> = postings
            .iter()
            .filter(|p| terms.contains(&p.term))
            .collect();
        if matching.is_empty() {
            return Vec::new();
        }
        // fixed summation order keeps scores bit-identical across runs
        matching.sort_by(|a, b| {
            a.document_id
                .cmp(&b.document_id)
                .then_with(|| a.term.cmp(&b.term))
        });

        let idfs: HashMap<&str, f64> = document_frequencies(&matching)
            .into_iter()
            .map(|(term, df)| (term, idf(corpus.total_documents, df)))
            .collect();

        let mut scores: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for posting in matching {
            let term_idf = idfs.get(posting.term.as_str()).copied().unwrap_or(0.0);
            *scores.entry(posting.document_id).or_insert(0.0) +=
                self.contribution(term_idf, posting, corpus.average_document_length);
        }

        scores
            .into_iter()
            .map(|(document_id, score)| DocumentScore { document_id, score })
            .collect()
    }

    /// Weight of one posting: IDF times saturated, length-normalized term frequency
    pub fn contribution(&self, idf: f64, posting: &Posting, avg_doc_len: f64) -> f64 {
        if posting.term_frequency == 0 {
            return 0.0;
        }
        let Bm25Params { k1, b } = self.params;
        let tf = posting.term_frequency as f64;
        let norm = length_norm(posting.document_length as f64, avg_doc_len, b);

        let denom = tf + k1 * norm;
        if denom <= 0.0 {
            return 0.0;
        }
        idf * tf * (k1 + 1.0) / denom
    }
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Self::new(Bm25Params::default())
    }
}

/// Inverse document frequency. Not floored at zero: a term reported in more
/// documents than the corpus holds yields a negative value.
pub fn idf(total_documents: u64, document_frequency: usize) -> f64 {
    let n = total_documents as f64;
    let df = document_frequency as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// `1 - b + b * len / avg_len`, or 1 when the average length is unknown (zero)
pub fn length_norm(doc_len: f64, avg_doc_len: f64, b: f64) -> f64 {
    if avg_doc_len <= 0.0 {
        return 1.0;
    }
    1.0 - b + b * (doc_len / avg_doc_len)
}

/// Count of distinct documents per term
fn document_frequencies<'a>(postings: &[&'a Posting]) -> HashMap<&'a str, usize> {
    let mut docs: HashMap<&str, BTreeSet<DocumentId>> = HashMap::new();
    for posting in postings {
        docs.entry(posting.term.as_str())
            .or_default()
            .insert(posting.document_id);
    }
    docs.into_iter().map(|(term, ids)| (term, ids.len())).collect()
}
