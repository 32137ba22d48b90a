//! Tests for engine module

use super::*;
use crate::error::Error;
use crate::pagination::MemoryScope;
use crate::params::ErrorKind;
use crate::types::{CursorValue, SortDirection};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn items() -> MemoryScope {
    MemoryScope::new((1..=10).map(|id| json!({ "id": id })).collect())
}

/// Scope that fails the test if the pipeline queries it
struct UntouchedScope;

impl QueryScope for UntouchedScope {
    type Record = Value;

    fn count(&self) -> Result<u64> {
        panic!("count called on rejected request")
    }

    fn filter_greater_than(self, _: &str, _: &CursorValue) -> Self {
        self
    }

    fn filter_less_than(self, _: &str, _: &CursorValue) -> Self {
        self
    }

    fn order_by(self, _: &str, _: SortDirection) -> Self {
        self
    }

    fn limit(self, _: u64) -> Self {
        self
    }

    fn materialize(self) -> Result<Vec<Value>> {
        panic!("materialize called on rejected request")
    }
}

// ============================================================================
// PageEngine Tests
// ============================================================================

#[test]
fn test_run_first_page_document() {
    let outcome = PageEngine::new("id")
        .run_query("page[size]=3", items(), "/items")
        .unwrap();
    assert_eq!(outcome.status_code(), 200);

    assert_eq!(
        outcome.into_document().unwrap(),
        json!({
            "data": [{"id": 1}, {"id": 2}, {"id": 3}],
            "meta": {"page": {"cursor": {"before": 1, "after": 3}, "total": 10, "pages": 4}},
            "links": {
                "prev": "/items?page%5Bbefore%5D=1&page%5Bsize%5D=3",
                "next": "/items?page%5Bafter%5D=3&page%5Bsize%5D=3"
            }
        })
    );
}

#[test]
fn test_run_without_page_params_returns_everything() {
    let outcome = PageEngine::new("id")
        .run_query("filter[x]=1", items(), "/items")
        .unwrap();
    assert_eq!(outcome.rows().map(<[Value]>::len), Some(10));

    let document = outcome.into_document().unwrap();
    assert!(document.get("meta").is_none());
    assert!(document.get("links").is_none());
}

#[test]
fn test_run_rejects_range_without_querying() {
    let outcome = PageEngine::new("id")
        .run_query(
            "page[size]=3&page[before]=8&page[after]=3",
            UntouchedScope,
            "/items",
        )
        .unwrap();
    assert!(outcome.is_rejected());
    assert_eq!(outcome.status_code(), 400);
    assert_eq!(
        outcome.errors()[0].kind,
        ErrorKind::RangePaginationNotSupported
    );

    let document = outcome.into_document().unwrap();
    assert_eq!(document["errors"][0]["status"], "400");
    assert_eq!(
        document["errors"][0]["links"]["type"][0],
        "https://jsonapi.org/profiles/ethanresnick/cursor-pagination/range-pagination-not-supported"
    );
}

#[test]
fn test_run_follows_next_link() {
    let engine = PageEngine::new("id");
    let first = engine
        .run_query("page[size]=4&filter[kind]=all", items(), "/items")
        .unwrap();
    let PageOutcome::Page { envelope, .. } = first else {
        panic!("expected a page");
    };
    let next = envelope.links.unwrap().next.unwrap();
    let (_, query) = next.split_once('?').unwrap();

    let second = engine.run_query(query, items(), "/items").unwrap();
    assert_eq!(
        second.rows().unwrap(),
        &[json!({"id": 5}), json!({"id": 6}), json!({"id": 7}), json!({"id": 8})]
    );
}

#[test]
fn test_max_size_from_collection() {
    let collection = crate::config::CollectionConfig {
        name: "items".into(),
        table: Some("items".into()),
        query: None,
        cursor_field: "id".into(),
        result_field: None,
    };
    let engine = PageEngine::from_collection(&collection, Some(5));

    let outcome = engine.run_query("page[size]=6", UntouchedScope, "/items").unwrap();
    assert_eq!(outcome.errors()[0].kind, ErrorKind::MaxSizeExceeded);

    let outcome = engine.run_query("page[size]=5", items(), "/items").unwrap();
    assert_eq!(outcome.rows().map(<[Value]>::len), Some(5));
}

#[test]
fn test_result_field_drives_cursors() {
    let scope: MemoryScope = MemoryScope::new(
        (1..=4)
            .map(|id| json!({ "id": id, "seq": id * 10 }))
            .collect(),
    );
    let outcome = PageEngine::new("id")
        .with_result_field("seq")
        .run_query("page[size]=2", scope, "/s")
        .unwrap();
    let document = outcome.into_document().unwrap();
    assert_eq!(
        document["meta"]["page"]["cursor"],
        json!({"before": 10, "after": 20})
    );
}

#[test]
fn test_scope_errors_propagate() {
    struct FailingScope;

    impl QueryScope for FailingScope {
        type Record = Value;

        fn count(&self) -> Result<u64> {
            Err(Error::query("connection reset"))
        }
        fn filter_greater_than(self, _: &str, _: &CursorValue) -> Self {
            self
        }
        fn filter_less_than(self, _: &str, _: &CursorValue) -> Self {
            self
        }
        fn order_by(self, _: &str, _: SortDirection) -> Self {
            self
        }
        fn limit(self, _: u64) -> Self {
            self
        }
        fn materialize(self) -> Result<Vec<Value>> {
            Ok(Vec::new())
        }
    }

    let err = PageEngine::new("id")
        .run_query("page[size]=2", FailingScope, "/x")
        .unwrap_err();
    assert!(matches!(err, Error::Query { .. }));
}
