mod common;

use common::{memory_index, sqlite_index};
use orion_core::{CorpusSnapshot, SearchConfig, SearchEngine, SearchError};
use tempfile::TempDir;

#[test]
fn test_sqlite_and_memory_agree() {
    let temp = TempDir::new().unwrap();
    let sqlite = sqlite_index(&temp);
    let memory = memory_index();
    let config = SearchConfig::default();

    let from_sqlite = SearchEngine::new(&sqlite, &sqlite, &config).unwrap();
    let from_memory = SearchEngine::new(&memory, &memory, &config).unwrap();

    for query in ["best hostels in Mallorca", "beach", "Palma cathedral", "the"] {
        assert_eq!(
            from_sqlite.search(query).unwrap(),
            from_memory.search(query).unwrap(),
            "query {query:?}"
        );
    }
}

#[test]
fn test_multi_term_ranking() {
    let index = memory_index();
    let engine = SearchEngine::new(&index, &index, &SearchConfig::default()).unwrap();

    let results = engine.search("Hostels near the beach").unwrap();
    let ids: Vec<_> = results.iter().map(|s| s.document_id).collect();
    // doc 2 matches both terms
    assert_eq!(ids[0], 2);
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(&4));
}

#[test]
fn test_results_sorted_with_id_tiebreak() {
    let index = memory_index();
    let engine = SearchEngine::new(&index, &index, &SearchConfig::default()).unwrap();

    // docs 3 and 4 both have "palma" once with length 10
    let results = engine.search("palma").unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].score, results[1].score);
    assert_eq!(results[0].document_id, 3);
    assert_eq!(results[1].document_id, 4);

    let results = engine.search("hostel beach palma mallorca").unwrap();
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].document_id < pair[1].document_id);
        }
    }
}

#[test]
fn test_repeated_queries_identical() {
    let temp = TempDir::new().unwrap();
    let index = sqlite_index(&temp);
    let engine = SearchEngine::new(&index, &index, &SearchConfig::default()).unwrap();

    let first = serde_json::to_string(&engine.search("beach hostel palma").unwrap()).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string(&engine.search("beach hostel palma").unwrap()).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn test_concurrent_queries_do_not_interfere() {
    let index = memory_index();
    let engine = SearchEngine::new(&index, &index, &SearchConfig::default()).unwrap();
    let expected_beach = engine.search("beach").unwrap();
    let expected_hostel = engine.search("hostel").unwrap();

    std::thread::scope(|scope| {
        for i in 0..16 {
            let engine = &engine;
            let expected = if i % 2 == 0 {
                &expected_beach
            } else {
                &expected_hostel
            };
            scope.spawn(move || {
                let query = if i % 2 == 0 { "beach" } else { "hostel" };
                assert_eq!(&engine.search(query).unwrap(), expected);
            });
        }
    });
}

#[test]
fn test_stopword_only_query_returns_nothing() {
    let temp = TempDir::new().unwrap();
    let index = sqlite_index(&temp);
    let engine = SearchEngine::new(&index, &index, &SearchConfig::default()).unwrap();
    assert!(engine.search("the a an").unwrap().is_empty());
    assert!(engine.search("   ").unwrap().is_empty());
}

#[test]
fn test_unknown_terms_return_nothing() {
    let index = memory_index();
    let engine = SearchEngine::new(&index, &index, &SearchConfig::default()).unwrap();
    assert!(engine.search("volcano").unwrap().is_empty());
}

#[test]
fn test_missing_database_aborts_query() {
    let temp = TempDir::new().unwrap();
    let index = sqlite_index(&temp);
    std::fs::remove_file(index.path()).unwrap();

    let engine = SearchEngine::new(&index, &index, &SearchConfig::default()).unwrap();
    assert!(matches!(
        engine.search("hostel"),
        Err(SearchError::Retrieval(_))
    ));
}

#[test]
fn test_empty_corpus_statistics_do_not_divide_by_zero() {
    let index = memory_index();
    let stats = CorpusSnapshot {
        total_documents: 0,
        average_document_length: 0.0,
    };
    let engine = SearchEngine::new(&index, stats, &SearchConfig::default()).unwrap();
    let results = engine.search("hostel").unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|s| s.score.is_finite()));
}

#[test]
fn test_top_k_from_config() {
    let index = memory_index();
    let config = SearchConfig {
        top_k: 1,
        ..SearchConfig::default()
    };
    let engine = SearchEngine::new(&index, &index, &config).unwrap();
    assert_eq!(engine.search("hostel beach palma").unwrap().len(), 1);
}

#[test]
fn test_query_with_many_distinct_terms() {
    let temp = TempDir::new().unwrap();
    let sqlite = sqlite_index(&temp);
    let memory = memory_index();
    let config = SearchConfig::default();

    let mut query: String = (0..40_000).map(|i| format!("zq{i}x ")).collect();
    query.push_str("hostel");

    let from_sqlite = SearchEngine::new(&sqlite, &sqlite, &config)
        .unwrap()
        .search(&query)
        .unwrap();
    let from_memory = SearchEngine::new(&memory, &memory, &config)
        .unwrap()
        .search(&query)
        .unwrap();
    assert_eq!(from_sqlite.len(), 2);
    assert_eq!(from_sqlite, from_memory);
}
