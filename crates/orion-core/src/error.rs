//! Error types for the search pipeline

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by an index or statistics adapter
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct RetrievalError {
    pub operation: &'static str,
    #[source]
    pub source: BoxError,
}

impl RetrievalError {
    pub fn new(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    /// Query bytes are not valid UTF-8
    #[error("query is not valid UTF-8: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}
