use std::path::Path;

use orion_core::{SearchConfig, SearchEngine};
use orion_index::SqliteIndex;

/// Command-line values that take precedence over the config file
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub top_k: Option<usize>,
    pub k1: Option<f64>,
    pub b: Option<f64>,
}

pub fn run(
    db: &Path,
    query: &str,
    config_path: Option<&Path>,
    overrides: Overrides,
) -> anyhow::Result<()> {
    let config = resolve_config(config_path, overrides)?;
    let index = SqliteIndex::open_existing(db)?;
    let engine = SearchEngine::new(&index, &index, &config)?;

    let results = engine.search(query)?;
    tracing::info!(query, results = results.len(), "search complete");
    println!("{}", serde_json::to_string(&results)?);
    Ok(())
}

fn resolve_config(path: Option<&Path>, overrides: Overrides) -> anyhow::Result<SearchConfig> {
    let mut config = match path {
        Some(path) => SearchConfig::from_json_file(path)?,
        None => SearchConfig::default(),
    };
    if let Some(top_k) = overrides.top_k {
        config.top_k = top_k;
    }
    if let Some(k1) = overrides.k1 {
        config.bm25.k1 = k1;
    }
    if let Some(b) = overrides.b {
        config.bm25.b = b;
    }
    config.validate()?;
    Ok(config)
}
