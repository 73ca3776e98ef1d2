//! SQLite-backed inverted index

use anyhow::{bail, Context, Result};
use chrono::Utc;
use orion_core::{CorpusStatistics, DocumentId, IndexReader, Posting, RetrievalError};
use rusqlite::{params, Connection, OpenFlags};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Index stored in a single SQLite file.
///
/// Holds only the database path; each call opens its own connection, so the
/// index can be shared across threads.
#[derive(Debug, Clone)]
pub struct SqliteIndex {
    db_path: PathBuf,
}

impl SqliteIndex {
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let index = Self { db_path };
        index.init_db()?;
        Ok(index)
    }

    /// Open an index that must already exist, without creating or migrating it
    pub fn open_existing(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if !db_path.is_file() {
            bail!("no index at {}", db_path.display());
        }

        let conn = Connection::open_with_flags(&db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("opening index {}", db_path.display()))?;
        let tables: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name IN ('pages', 'inverted_index')",
            [],
            |row| row.get(0),
        )?;
        if tables != 2 {
            bail!("{} is not an orion index", db_path.display());
        }
        Ok(Self { db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pages (
                url_id INTEGER PRIMARY KEY,
                title TEXT,
                length INTEGER NOT NULL,
                indexed_at TEXT
            );
            CREATE TABLE IF NOT EXISTS inverted_index (
                term TEXT NOT NULL,
                url_id INTEGER NOT NULL REFERENCES pages(url_id),
                term_frequency INTEGER NOT NULL,
                positions TEXT NOT NULL,
                PRIMARY KEY (term, url_id)
            );
            CREATE INDEX IF NOT EXISTS idx_inverted_url ON inverted_index(url_id);",
        )?;
        Ok(())
    }

    /// Insert or replace a page row
    pub fn put_page(&self, url_id: DocumentId, length: u32, title: Option<&str>) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO pages (url_id, title, length, indexed_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (url_id) DO UPDATE
             SET title = excluded.title,
                 length = excluded.length,
                 indexed_at = excluded.indexed_at",
            params![url_id, title, length, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Upsert the postings of one page; term frequency is the number of positions.
    /// Returns the number of rows written.
    pub fn insert_terms(
        &self,
        url_id: DocumentId,
        term_data: &BTreeMap<String, Vec<u32>>,
    ) -> Result<usize> {
        if term_data.is_empty() {
            warn!(url_id, "no terms to insert");
            return Ok(0);
        }

        let mut conn = Connection::open(&self.db_path)?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO inverted_index (term, url_id, term_frequency, positions)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (term, url_id) DO UPDATE
                 SET term_frequency = excluded.term_frequency,
                     positions = excluded.positions",
            )?;
            for (term, positions) in term_data {
                stmt.execute(params![
                    term,
                    url_id,
                    positions.len() as i64,
                    serde_json::to_string(positions)?
                ])?;
            }
        }
        tx.commit()?;
        Ok(term_data.len())
    }

    fn read_only(&self, operation: &'static str) -> Result<Connection, RetrievalError> {
        Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| RetrievalError::new(operation, e))
    }
}

impl IndexReader for SqliteIndex {
    fn fetch_postings(&self, terms: &BTreeSet<String>) -> Result<Vec<Posting>, RetrievalError> {
        const OP: &str = "fetch_postings";
        if terms.is_empty() {
            warn!("empty term set passed to fetch_postings");
            return Ok(Vec::new());
        }

        // one JSON array parameter, however many terms the query has
        let term_list = serde_json::to_string(terms).map_err(|e| RetrievalError::new(OP, e))?;

        let conn = self.read_only(OP)?;
        let mut stmt = conn
            .prepare(
                "SELECT ii.term, ii.url_id, ii.term_frequency, ii.positions, p.length
                 FROM inverted_index ii
                 JOIN pages p ON ii.url_id = p.url_id
                 WHERE ii.term IN (SELECT value FROM json_each(?1))
                 ORDER BY ii.term, ii.url_id",
            )
            .map_err(|e| RetrievalError::new(OP, e))?;
        let rows = stmt
            .query_map([&term_list], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, u32>(4)?,
                ))
            })
            .map_err(|e| RetrievalError::new(OP, e))?;

        let mut postings = Vec::new();
        for row in rows {
            let (term, document_id, term_frequency, positions, document_length) =
                row.map_err(|e| RetrievalError::new(OP, e))?;
            let positions: Vec<u32> =
                serde_json::from_str(&positions).map_err(|e| RetrievalError::new(OP, e))?;
            postings.push(Posting {
                term,
                document_id,
                term_frequency,
                positions,
                document_length,
            });
        }
        Ok(postings)
    }
}

impl CorpusStatistics for SqliteIndex {
    fn total_document_count(&self) -> Result<u64, RetrievalError> {
        const OP: &str = "total_document_count";
        let conn = self.read_only(OP)?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))
            .map_err(|e| RetrievalError::new(OP, e))?;
        Ok(count.max(0) as u64)
    }

    fn average_document_length(&self) -> Result<f64, RetrievalError> {
        const OP: &str = "average_document_length";
        let conn = self.read_only(OP)?;
        let avg: Option<f64> = conn
            .query_row("SELECT AVG(length) FROM pages", [], |row| row.get(0))
            .map_err(|e| RetrievalError::new(OP, e))?;
        Ok(avg.unwrap_or(0.0))
    }
}
