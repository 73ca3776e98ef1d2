use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use orion_core::DocumentId;
use orion_index::SqliteIndex;
use serde::Deserialize;
use tracing::{info, warn};

/// One pre-built page record
#[derive(Debug, Deserialize)]
pub struct PageRecord {
    pub document_id: DocumentId,
    pub length: u32,
    #[serde(default)]
    pub title: Option<String>,
    /// term -> positions
    #[serde(default)]
    pub terms: BTreeMap<String, Vec<u32>>,
}

pub fn run(db: &Path, file: &Path) -> anyhow::Result<()> {
    let index = SqliteIndex::open(db)?;
    let records = read_records(file)?;

    let mut postings = 0;
    for record in &records {
        index.put_page(record.document_id, record.length, record.title.as_deref())?;
        postings += index.insert_terms(record.document_id, &record.terms)?;
    }

    info!(pages = records.len(), postings, "index seeded");
    println!(
        "{}",
        serde_json::json!({ "pages": records.len(), "postings": postings })
    );
    Ok(())
}

/// Parse JSONL page records, skipping blank and malformed lines
pub fn read_records(path: &Path) -> anyhow::Result<Vec<PageRecord>> {
    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut records = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(line = lineno + 1, error = %e, "skipping malformed record"),
        }
    }

    Ok(records)
}
