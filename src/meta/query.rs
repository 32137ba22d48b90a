//! Nested query strings
//!
//! `page[size]=3&filter[tags][]=a` <-> `{"page": {"size": "3"}, "filter": {"tags": ["a"]}}`

use crate::types::{JsonObject, JsonValue, QueryParams};
use url::form_urlencoded;

/// Serialize nested parameters into a percent-encoded query string.
///
/// Object entries are sorted, array items keep their order, `null` renders as
/// an empty value and empty containers render as `key[]=`.
pub fn to_query(params: &QueryParams) -> String {
    let mut parts: Vec<String> = params
        .iter()
        .map(|(key, value)| value_to_query(key, value))
        .filter(|part| !part.is_empty())
        .collect();
    parts.sort();
    parts.join("&")
}

fn value_to_query(key: &str, value: &JsonValue) -> String {
    match value {
        JsonValue::Object(map) if map.is_empty() => pair(&format!("{key}[]"), ""),
        JsonValue::Object(map) => {
            let mut parts: Vec<String> = map
                .iter()
                .map(|(k, v)| value_to_query(&format!("{key}[{k}]"), v))
                .filter(|part| !part.is_empty())
                .collect();
            // objects nested in arrays keep insertion order
            if !key.contains("[]") {
                parts.sort();
            }
            parts.join("&")
        }
        JsonValue::Array(items) if items.is_empty() => pair(&format!("{key}[]"), ""),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| value_to_query(&format!("{key}[]"), item))
            .collect::<Vec<_>>()
            .join("&"),
        JsonValue::Null => pair(key, ""),
        JsonValue::String(s) => pair(key, s),
        other => pair(key, &other.to_string()),
    }
}

fn pair(key: &str, value: &str) -> String {
    format!("{}={}", encode(key), encode(value))
}

fn encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// Parse a query string with bracketed keys into nested parameters.
///
/// Later duplicates win, `key[]` collects into an array, and keys with
/// malformed brackets are kept verbatim.
pub fn parse_nested_query(query: &str) -> QueryParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = QueryParams::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key.is_empty() {
            continue;
        }
        insert_path(&mut params, &key_path(&key), value.into_owned());
    }

    params
}

/// Split `a[b][c]` into `["a", "b", "c"]`
fn key_path(key: &str) -> Vec<String> {
    let flat = || vec![key.to_string()];

    let Some(open) = key.find('[') else {
        return flat();
    };
    if open == 0 {
        return flat();
    }

    let mut path = vec![key[..open].to_string()];
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            return flat();
        };
        path.push(stripped[..close].to_string());
        rest = &stripped[close + 1..];
    }

    // trailing junk, or `[]` anywhere but last
    if !rest.is_empty() || path[1..path.len() - 1].iter().any(String::is_empty) {
        return flat();
    }

    path
}

fn insert_path(target: &mut JsonObject, path: &[String], value: String) {
    match path {
        [] => {}
        [key] => {
            target.insert(key.clone(), JsonValue::String(value));
        }
        [key, last] if last.is_empty() => {
            let entry = target
                .entry(key.clone())
                .or_insert_with(|| JsonValue::Array(Vec::new()));
            if !entry.is_array() {
                *entry = JsonValue::Array(Vec::new());
            }
            if let JsonValue::Array(items) = entry {
                items.push(JsonValue::String(value));
            }
        }
        [key, rest @ ..] => {
            let entry = target
                .entry(key.clone())
                .or_insert_with(|| JsonValue::Object(JsonObject::new()));
            if !entry.is_object() {
                *entry = JsonValue::Object(JsonObject::new());
            }
            if let JsonValue::Object(map) = entry {
                insert_path(map, rest, value);
            }
        }
    }
}
