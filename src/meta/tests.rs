//! Tests for meta module

use super::*;
use crate::pagination::PageResult;
use crate::types::{CursorValue, QueryParams};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn params(value: Value) -> QueryParams {
    value.as_object().cloned().unwrap_or_default()
}

fn page(rows: Vec<i64>, size: u64, total: u64) -> PageResult<Value> {
    let rows: Vec<Value> = rows.into_iter().map(|id| json!({ "id": id })).collect();
    PageResult {
        prev_cursor: rows.first().map(|r| CursorValue::Int(r["id"].as_i64().unwrap())),
        next_cursor: rows.last().map(|r| CursorValue::Int(r["id"].as_i64().unwrap())),
        rows,
        size,
        total_size: Some(total),
        total_pages: Some(total.div_ceil(size)),
    }
}

// ============================================================================
// to_query Tests
// ============================================================================

#[test]
fn test_to_query_sorts_and_nests() {
    let query = to_query(&params(json!({
        "page": {"size": 3, "after": 9},
        "filter": {"name": "x y"},
        "a": "1"
    })));
    assert_eq!(
        query,
        "a=1&filter%5Bname%5D=x+y&page%5Bafter%5D=9&page%5Bsize%5D=3"
    );
}

#[test]
fn test_to_query_arrays_keep_order() {
    let query = to_query(&params(json!({"ids": ["3", "1", "2"]})));
    assert_eq!(query, "ids%5B%5D=3&ids%5B%5D=1&ids%5B%5D=2");
}

#[test]
fn test_to_query_special_values() {
    assert_eq!(to_query(&params(json!({"x": null}))), "x=");
    assert_eq!(to_query(&params(json!({"f": {}}))), "f%5B%5D=");
    assert_eq!(to_query(&params(json!({"l": []}))), "l%5B%5D=");
    assert_eq!(to_query(&params(json!({"q": "a&b=c"}))), "q=a%26b%3Dc");
    assert_eq!(to_query(&params(json!({"n": 5, "t": true}))), "n=5&t=true");
    assert_eq!(to_query(&QueryParams::new()), "");
}

// ============================================================================
// parse_nested_query Tests
// ============================================================================

#[test]
fn test_parse_nested_query() {
    let parsed = parse_nested_query("page[size]=3&page[after]=5&sort=name");
    assert_eq!(
        Value::Object(parsed),
        json!({"page": {"size": "3", "after": "5"}, "sort": "name"})
    );
}

#[test]
fn test_parse_nested_query_edge_cases() {
    assert_eq!(
        Value::Object(parse_nested_query("?a=1&a=2")),
        json!({"a": "2"})
    );
    assert_eq!(
        Value::Object(parse_nested_query("ids[]=1&ids[]=2")),
        json!({"ids": ["1", "2"]})
    );
    assert_eq!(
        Value::Object(parse_nested_query("bad[key=1&x[a]b=2&[c]=3")),
        json!({"bad[key": "1", "x[a]b": "2", "[c]": "3"})
    );
    assert_eq!(
        Value::Object(parse_nested_query("q=a%26b+c&page%5Bsize%5D=4")),
        json!({"q": "a&b c", "page": {"size": "4"}})
    );
    assert_eq!(
        Value::Object(parse_nested_query("a=1&a[b]=2")),
        json!({"a": {"b": "2"}})
    );
    assert!(parse_nested_query("").is_empty());
}

#[test]
fn test_parse_then_serialize_is_canonical() {
    let canonical = "filter%5Bname%5D=bob&page%5Bafter%5D=3&page%5Bsize%5D=3";
    assert_eq!(to_query(&parse_nested_query(canonical)), canonical);
}

// ============================================================================
// MetadataBuilder Tests
// ============================================================================

#[test]
fn test_build_first_page() {
    let result = page(vec![1, 2, 3], 3, 10);
    let query = params(json!({"filter": {"name": "x y"}, "page": {"size": "3"}}));

    let envelope = build(&result, "http://example.com/items", &query);

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "meta": {"page": {"cursor": {"before": 1, "after": 3}, "total": 10, "pages": 4}},
            "links": {
                "prev": "http://example.com/items?filter%5Bname%5D=x+y&page%5Bbefore%5D=1&page%5Bsize%5D=3",
                "next": "http://example.com/items?filter%5Bname%5D=x+y&page%5Bafter%5D=3&page%5Bsize%5D=3"
            }
        })
    );
}

#[test]
fn test_build_overrides_existing_page_params() {
    let result = page(vec![4, 5, 6], 3, 10);
    let query = params(json!({"page": {"size": "3", "after": "3", "stale": "x"}, "include": "author"}));

    let envelope = MetadataBuilder::new("/items")
        .with_query_params(query)
        .build(&result);
    let links = envelope.links.unwrap();

    assert_eq!(
        links.next.as_deref(),
        Some("/items?include=author&page%5Bafter%5D=6&page%5Bsize%5D=3")
    );
    assert_eq!(
        links.prev.as_deref(),
        Some("/items?include=author&page%5Bbefore%5D=4&page%5Bsize%5D=3")
    );
}

#[test]
fn test_build_disabled_is_empty() {
    let result = PageResult::unpaginated(vec![json!({"id": 1})]);
    let envelope = build(&result, "/items", &QueryParams::new());

    assert!(envelope.is_empty());
    assert_eq!(serde_json::to_value(&envelope).unwrap(), json!({}));
}

#[test]
fn test_build_empty_page_omits_cursors_and_links() {
    let result = page(vec![], 3, 10);
    let envelope = build(&result, "/items", &QueryParams::new());

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"meta": {"page": {"total": 10, "pages": 4}}})
    );
}

#[test]
fn test_build_text_cursor_link() {
    let mut result = page(vec![], 2, 2);
    result.prev_cursor = Some(CursorValue::Text("2024-01-01 10:00".into()));

    let envelope = build(&result, "/events", &QueryParams::new());
    let value = serde_json::to_value(&envelope).unwrap();

    assert_eq!(value["meta"]["page"]["cursor"], json!({"before": "2024-01-01 10:00"}));
    assert_eq!(
        value["links"],
        json!({"prev": "/events?page%5Bbefore%5D=2024-01-01+10%3A00&page%5Bsize%5D=2"})
    );
}

#[test]
fn test_build_is_idempotent() {
    let result = page(vec![1, 2], 2, 5);
    let query = params(json!({"sort": null, "filter": {"a": ["1", "2"]}}));

    let first = build(&result, "/x", &query);
    let second = build(&result, "/x", &query);
    assert_eq!(first, second);
}

#[test]
fn test_base_url_with_query_string() {
    let result = page(vec![1], 1, 1);
    let envelope = build(&result, "/x?token=abc", &QueryParams::new());
    assert_eq!(
        envelope.links.unwrap().next.as_deref(),
        Some("/x?token=abc&page%5Bafter%5D=1&page%5Bsize%5D=1")
    );
}

// ============================================================================
// PageEnvelope Tests
// ============================================================================

#[test]
fn test_merge_into_document() {
    let envelope = build(&page(vec![1, 2], 2, 4), "/x", &QueryParams::new());

    let mut document = params(json!({
        "data": [{"id": 1}, {"id": 2}],
        "meta": {"generated": "now"},
        "links": {"self": "/x"}
    }));
    envelope.merge_into(&mut document);

    assert_eq!(document["meta"]["generated"], "now");
    assert_eq!(document["meta"]["page"]["total"], 4);
    assert_eq!(document["links"]["self"], "/x");
    assert_eq!(
        document["links"]["next"],
        "/x?page%5Bafter%5D=2&page%5Bsize%5D=2"
    );
}

#[test]
fn test_merge_empty_envelope_leaves_document() {
    let mut document = params(json!({"data": []}));
    PageEnvelope::default().merge_into(&mut document);
    assert_eq!(Value::Object(document), json!({"data": []}));
}
