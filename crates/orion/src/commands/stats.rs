use std::path::Path;

use orion_core::CorpusStatistics;
use orion_index::SqliteIndex;

pub fn run(db: &Path) -> anyhow::Result<()> {
    let index = SqliteIndex::open_existing(db)?;
    let output = serde_json::json!({
        "total_documents": index.total_document_count()?,
        "average_document_length": index.average_document_length()?,
    });
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_index_is_reported_not_created() {
        let temp = tempfile::TempDir::new().unwrap();
        let db = temp.path().join("missing").join("orion.db");
        assert!(run(&db).is_err());
        assert!(!db.exists());
        assert!(!db.parent().unwrap().exists());
    }

    #[test]
    fn test_stats_on_existing_index() {
        let temp = tempfile::TempDir::new().unwrap();
        let db = temp.path().join("orion.db");
        let index = SqliteIndex::open(&db).unwrap();
        index.put_page(1, 10, None).unwrap();
        assert!(run(&db).is_ok());
    }
}
