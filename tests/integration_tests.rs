//! End-to-end pagination tests
//!
//! Query string → validation → cursor window → JSON:API document, over both the
//! in-memory scope and DuckDB.

use cursor_pager::database::{open_database, run_init, DuckDbScope};
use cursor_pager::meta::parse_nested_query;
use cursor_pager::params::ErrorKind;
use cursor_pager::{
    load_config_from_str, MemoryScope, PageEngine, PageOutcome, ParameterValidator,
    RawPageParams,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const CONFIG: &str = r#"
init:
  - CREATE TABLE items AS SELECT range AS id, concat('item-', range) AS name FROM range(1, 11)
collections:
  - name: items
    table: items
    cursor_field: id
"#;

fn memory_items() -> MemoryScope {
    MemoryScope::new((1..=10).map(|id| json!({ "id": id })).collect())
}

fn ids(document: &Value) -> Vec<i64> {
    document["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

/// Query string of a link, without the path
fn link_query(document: &Value, rel: &str) -> String {
    let link = document["links"][rel].as_str().unwrap();
    link.split_once('?').unwrap().1.to_string()
}

// ============================================================================
// In-Memory Pipeline
// ============================================================================

#[test]
fn test_walk_forward_through_all_pages() {
    let engine = PageEngine::new("id");
    let mut query = "page[size]=3".to_string();
    let mut seen = Vec::new();

    for _ in 0..4 {
        let document = engine
            .run_query(&query, memory_items(), "/items")
            .unwrap()
            .into_document()
            .unwrap();
        assert_eq!(document["meta"]["page"]["pages"], 4);
        seen.extend(ids(&document));
        query = link_query(&document, "next");
    }

    assert_eq!(seen, (1..=10).collect::<Vec<_>>());

    // past the end: empty page, no cursors, no links
    let document = engine
        .run_query(&query, memory_items(), "/items")
        .unwrap()
        .into_document()
        .unwrap();
    assert_eq!(
        document,
        json!({"data": [], "meta": {"page": {"total": 10, "pages": 4}}})
    );
}

#[test]
fn test_prev_link_returns_previous_page() {
    let engine = PageEngine::new("id");
    let second = engine
        .run_query("page[size]=3&page[after]=3", memory_items(), "/items")
        .unwrap()
        .into_document()
        .unwrap();
    assert_eq!(ids(&second), vec![4, 5, 6]);

    let first = engine
        .run_query(&link_query(&second, "prev"), memory_items(), "/items")
        .unwrap()
        .into_document()
        .unwrap();
    assert_eq!(ids(&first), vec![1, 2, 3]);
}

#[test]
fn test_before_cursor_page() {
    let document = PageEngine::new("id")
        .run_query("page[size]=3&page[before]=8", memory_items(), "/items")
        .unwrap()
        .into_document()
        .unwrap();
    assert_eq!(ids(&document), vec![5, 6, 7]);
    assert_eq!(
        document["meta"]["page"]["cursor"],
        json!({"before": 5, "after": 7})
    );
}

#[test]
fn test_range_error_document() {
    let outcome = PageEngine::new("id")
        .run_query(
            "page[size]=3&page[before]=8&page[after]=3",
            memory_items(),
            "/items",
        )
        .unwrap();
    assert!(outcome.is_rejected());

    let document = outcome.into_document().unwrap();
    let errors = document["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["title"], "Range Pagination Not Supported.");
    assert_eq!(
        errors[0]["links"]["type"],
        json!(["https://jsonapi.org/profiles/ethanresnick/cursor-pagination/range-pagination-not-supported"])
    );
}

#[test]
fn test_links_keep_other_parameters() {
    let document = PageEngine::new("id")
        .run_query(
            "filter[name]=x%20y&include=author&page[size]=2",
            memory_items(),
            "https://api.example.com/items",
        )
        .unwrap()
        .into_document()
        .unwrap();

    let next = parse_nested_query(&link_query(&document, "next"));
    assert_eq!(
        Value::Object(next),
        json!({
            "filter": {"name": "x y"},
            "include": "author",
            "page": {"after": "2", "size": "2"}
        })
    );
}

#[test]
fn test_validator_standalone() {
    let (request, errors) =
        ParameterValidator::new().validate(&RawPageParams::from_query("page[size]=abc"));
    assert_eq!(request.size, 0);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::InvalidParameter);
    assert_eq!(errors[0].parameter(), Some("page[size]"));
}

// ============================================================================
// DuckDB Pipeline
// ============================================================================

#[test]
fn test_duckdb_collection_pages() {
    let config = load_config_from_str(CONFIG).unwrap();
    let conn = open_database(&config.database).unwrap();
    run_init(&conn, &config.init).unwrap();

    let collection = config.collection("items").unwrap();
    let engine = PageEngine::from_collection(collection, config.max_page_size);
    let base_url = config.collection_url("items");

    let outcome = engine
        .run_query(
            "page[size]=3",
            DuckDbScope::for_collection(&conn, collection).unwrap(),
            &base_url,
        )
        .unwrap();
    let PageOutcome::Page { rows, envelope } = outcome else {
        panic!("expected a page");
    };
    assert_eq!(
        rows,
        vec![
            json!({"id": 1, "name": "item-1"}),
            json!({"id": 2, "name": "item-2"}),
            json!({"id": 3, "name": "item-3"}),
        ]
    );
    let meta = envelope.meta.unwrap();
    assert_eq!(meta.page.total, 10);
    assert_eq!(meta.page.pages, 4);
    assert_eq!(
        envelope.links.unwrap().next.as_deref(),
        Some("/collections/items?page%5Bafter%5D=3&page%5Bsize%5D=3")
    );

    let document = engine
        .run_query(
            "page[size]=3&page[before]=8",
            DuckDbScope::for_collection(&conn, collection).unwrap(),
            &base_url,
        )
        .unwrap()
        .into_document()
        .unwrap();
    assert_eq!(ids(&document), vec![5, 6, 7]);
}
