use memquery::{records_from_json, Error, Record, SearchEngine, SearchExt};

fn sample_records() -> Vec<Record> {
    vec![
        Record::new()
            .with_field("author", "John Smith")
            .with_field("department", "Engineering")
            .with_field("priority", "high")
            .with_field("year", 2024),
        Record::new()
            .with_field("author", "Jane Doe")
            .with_field("department", "Finance")
            .with_field("priority", "low")
            .with_field("year", 2023),
        Record::new()
            .with_field("author", "Johnny Cash")
            .with_field("department", "Engineering")
            .with_field("priority", "medium")
            .with_field("year", 2025),
        Record::new()
            .with_field("author", "Alice Brown")
            .with_field("department", "Finance")
            .with_field("priority", "high")
            .with_field("year", 2024),
        Record::new()
            .with_field("author", "Bob Stone")
            .with_field("department", "Marketing")
            .with_field("priority", "high")
            .with_field("year", 2022),
    ]
}

fn authors(hits: &[&Record]) -> Vec<String> {
    hits.iter()
        .map(|r| r.get("author").unwrap().as_text())
        .collect()
}

#[test]
fn test_field_match_case_insensitive() {
    let engine = SearchEngine::with_records(sample_records());

    let hits = engine.search("author:john").unwrap();
    assert_eq!(authors(&hits), vec!["John Smith", "Johnny Cash"]);

    // same result regardless of query value casing
    let hits = engine.search("author:JOHN").unwrap();
    assert_eq!(authors(&hits), vec!["John Smith", "Johnny Cash"]);
}

#[test]
fn test_comparison_and_field_match_combined() {
    let engine = SearchEngine::with_records(sample_records());

    let hits = engine
        .search("year >= 2024 AND department:Engineering")
        .unwrap();
    assert_eq!(authors(&hits), vec!["John Smith", "Johnny Cash"]);
}

#[test]
fn test_grouped_union_intersected_with_priority() {
    let engine = SearchEngine::with_records(sample_records());

    let hits = engine
        .search("(department:Finance OR department:Engineering) AND priority:high")
        .unwrap();
    // left side of AND orders: Finance matches first, then Engineering
    assert_eq!(authors(&hits), vec!["Alice Brown", "John Smith"]);
}

#[test]
fn test_wildcard_returns_full_dataset_in_order() {
    let records = sample_records();
    let engine = SearchEngine::with_records(records.clone());

    let hits = engine.search("*").unwrap();
    assert_eq!(hits.len(), records.len());
    for (hit, record) in hits.iter().zip(records.iter()) {
        assert_eq!(*hit, record);
    }
}

#[test]
fn test_not_excludes_matches() {
    let engine = SearchEngine::with_records(sample_records());

    let hits = engine.search("NOT department:Engineering").unwrap();
    assert_eq!(authors(&hits), vec!["Jane Doe", "Alice Brown", "Bob Stone"]);
}

#[test]
fn test_trailing_tokens_are_a_syntax_error() {
    let engine = SearchEngine::with_records(sample_records());

    let result = engine.search("author:john extra");
    match result {
        Err(Error::Syntax { message, .. }) => {
            assert!(message.contains("trailing"), "{}", message);
        }
        other => panic!("expected a syntax error, got {:?}", other.map(|h| h.len())),
    }
}

#[test]
fn test_missing_value_is_a_syntax_error() {
    let engine = SearchEngine::with_records(sample_records());

    let result = engine.search("priority:");
    assert!(matches!(result, Err(Error::Syntax { .. })));
}

#[test]
fn test_stray_character_is_a_lex_error() {
    let engine = SearchEngine::with_records(sample_records());

    let result = engine.search("priority = high");
    match result {
        Err(Error::Lex { ch, position }) => {
            assert_eq!(ch, '=');
            assert_eq!(position, 9);
        }
        other => panic!("expected a lex error, got {:?}", other.map(|h| h.len())),
    }
}

#[test]
fn test_empty_dataset_yields_empty_results() {
    let engine = SearchEngine::new();
    assert!(engine.is_empty());

    assert!(engine.search("*").unwrap().is_empty());
    assert!(engine.search("author:john").unwrap().is_empty());
    assert!(engine.search("NOT author:john").unwrap().is_empty());
}

#[test]
fn test_load_data_replaces_wholesale() {
    let mut engine = SearchEngine::with_records(sample_records());
    assert_eq!(engine.len(), 5);

    engine.load_data(vec![Record::new().with_field("author", "Carol King")]);
    assert_eq!(engine.len(), 1);

    let hits = engine.search("author:john").unwrap();
    assert!(hits.is_empty());
    let hits = engine.search("author:carol").unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_quoted_value_matches_across_words() {
    let engine = SearchEngine::with_records(sample_records());

    let hits = engine.search(r#"author:"john smith""#).unwrap();
    assert_eq!(authors(&hits), vec!["John Smith"]);
}

#[test]
fn test_search_ext_on_record_slice() {
    let records = sample_records();

    let hits = records.search("department:Marketing").unwrap();
    assert_eq!(authors(&hits), vec!["Bob Stone"]);
}

#[test]
fn test_json_ingestion_end_to_end() {
    let json = r#"[
        {"author": "John Smith", "department": "Engineering", "year": 2024},
        {"author": "Jane Doe", "department": "Finance", "year": 2023}
    ]"#;
    let engine = SearchEngine::with_records(records_from_json(json).unwrap());

    let hits = engine.search("year >= 2024").unwrap();
    assert_eq!(authors(&hits), vec!["John Smith"]);
}
