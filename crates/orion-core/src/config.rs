//! Configuration for BM25 ranking

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ranker::DEFAULT_TOP_K;

/// BM25 free parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term frequency saturation
    pub k1: f64,
    /// Document length normalization strength (0 = none, 1 = full)
    pub b: f64,
}

impl Bm25Params {
    pub fn new() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self::new()
    }
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub bm25: Bm25Params,

    /// Number of results returned per query
    pub top_k: usize,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self {
            bm25: Bm25Params::new(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let Bm25Params { k1, b } = self.bm25;
        ensure!(k1.is_finite() && k1 >= 0.0, "k1 must be a non-negative number, got {k1}");
        ensure!((0.0..=1.0).contains(&b), "b must lie in [0, 1], got {b}");
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
