use orion_core::MemoryIndex;
use orion_index::SqliteIndex;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// (document id, length, [(stemmed term, positions)])
pub type PageFixture = (i64, u32, Vec<(&'static str, Vec<u32>)>);

pub fn sample_pages() -> Vec<PageFixture> {
    vec![
        (1, 8, vec![("hostel", vec![0, 5]), ("mallorca", vec![2])]),
        (2, 12, vec![("hostel", vec![3]), ("beach", vec![7, 9])]),
        (3, 10, vec![("beach", vec![1]), ("palma", vec![4])]),
        (4, 10, vec![("cathedr", vec![0]), ("palma", vec![2])]),
    ]
}

pub fn memory_index() -> MemoryIndex {
    let mut index = MemoryIndex::new();
    for (id, length, terms) in sample_pages() {
        index.add_document(id, length, terms);
    }
    index
}

pub fn sqlite_index(dir: &TempDir) -> SqliteIndex {
    let index = SqliteIndex::open(dir.path().join("orion.db")).unwrap();
    for (id, length, terms) in sample_pages() {
        index.put_page(id, length, None).unwrap();
        let term_data: BTreeMap<String, Vec<u32>> = terms
            .into_iter()
            .map(|(t, p)| (t.to_string(), p))
            .collect();
        index.insert_terms(id, &term_data).unwrap();
    }
    index
}
