//! Query normalization, BM25 scoring and ranking over a read-only inverted index

mod bm25;
mod config;
mod engine;
mod error;
mod normalizer;
mod ranker;
mod source;
mod types;

pub use bm25::{idf, length_norm, Bm25Scorer};
pub use config::{Bm25Params, SearchConfig};
pub use engine::SearchEngine;
pub use error::{BoxError, RetrievalError, SearchError};
pub use normalizer::Normalizer;
pub use ranker::{rank, DEFAULT_TOP_K};
pub use source::{CorpusStatistics, IndexReader, MemoryIndex};
pub use types::{CorpusSnapshot, DocumentId, DocumentScore, Posting, Query};
