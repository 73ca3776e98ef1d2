//! Query pipeline: normalize, fetch, score, rank

use std::collections::BTreeSet;
use std::thread;

use tracing::debug;

use crate::bm25::Bm25Scorer;
use crate::config::SearchConfig;
use crate::error::{RetrievalError, SearchError};
use crate::normalizer::Normalizer;
use crate::ranker::rank;
use crate::source::{CorpusStatistics, IndexReader};
use crate::types::{CorpusSnapshot, DocumentScore, Posting, Query};

/// Runs queries against an index reader and a statistics provider.
///
/// Holds no per-query state; one engine can serve concurrent queries.
pub struct SearchEngine<R, S> {
    reader: R,
    stats: S,
    scorer: Bm25Scorer,
    top_k: usize,
    normalizer: &'static Normalizer,
}

impl<R: IndexReader, S: CorpusStatistics> SearchEngine<R, S> {
    /// Fails when `config` does not pass [`SearchConfig::validate`]
    pub fn new(reader: R, stats: S, config: &SearchConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            stats,
            scorer: Bm25Scorer::new(config.bm25),
            top_k: config.top_k,
            normalizer: Normalizer::shared(),
        })
    }

    pub fn search(&self, query: &str) -> Result<Vec<DocumentScore>, SearchError> {
        self.search_with_limit(query, self.top_k)
    }

    /// Like [`search`](Self::search) for raw bytes, which must be UTF-8
    pub fn search_bytes(&self, query: &[u8]) -> Result<Vec<DocumentScore>, SearchError> {
        let query = std::str::from_utf8(query)?;
        self.search(query)
    }

    pub fn search_with_limit(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<DocumentScore>, SearchError> {
        let query = Query::parse(query, self.normalizer);
        debug!(raw = %query.raw, tokens = ?query.tokens, "normalized query");
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let terms = query.term_set();
        let (postings, corpus) = self.fetch(&terms)?;
        debug!(
            postings = postings.len(),
            total_documents = corpus.total_documents,
            average_document_length = corpus.average_document_length,
            "fetched postings"
        );

        let scores = self.scorer.score(&terms, &postings, &corpus);
        let ranked = rank(scores, k);
        debug!(results = ranked.len(), "ranked");
        Ok(ranked)
    }

    /// Read postings and corpus statistics concurrently; any failure aborts the query
    fn fetch(
        &self,
        terms: &BTreeSet<String>,
    ) -> Result<(Vec<Posting>, CorpusSnapshot), RetrievalError> {
        thread::scope(|scope| -> Result<_, RetrievalError> {
            let postings = scope.spawn(|| self.reader.fetch_postings(terms));
            let total = scope.spawn(|| self.stats.total_document_count());
            let average = self.stats.average_document_length();

            let total = join(total, "total_document_count");
            let postings = join(postings, "fetch_postings");

            Ok((
                postings?,
                CorpusSnapshot {
                    total_documents: total?,
                    average_document_length: average?,
                },
            ))
        })
    }
}

fn join<T>(
    handle: thread::ScopedJoinHandle<'_, Result<T, RetrievalError>>,
    operation: &'static str,
) -> Result<T, RetrievalError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(RetrievalError::new(operation, "worker thread panicked")))
}
