//! Pagination envelope types

use crate::types::{CursorValue, JsonObject, JsonValue};
use serde::Serialize;

/// `{meta, links}` produced for one page. Serializes to `{}` when pagination
/// is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

/// `meta`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: PageInfo,
}

/// `meta.page`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorMeta>,
    /// Records matching the unpaginated query
    pub total: u64,
    /// `ceil(total / size)`
    pub pages: u64,
}

/// `meta.page.cursor`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CursorMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<CursorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<CursorValue>,
}

/// `links`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PageEnvelope {
    /// Whether there is nothing to add to the response
    pub fn is_empty(&self) -> bool {
        self.meta.is_none() && self.links.is_none()
    }

    /// Convert to a JSON object
    pub fn to_json(&self) -> JsonObject {
        match serde_json::to_value(self) {
            Ok(JsonValue::Object(map)) => map,
            _ => JsonObject::new(),
        }
    }

    /// Merge into a response document. Existing `meta` and `links` members
    /// are kept; only `meta.page`, `links.prev` and `links.next` are written.
    pub fn merge_into(&self, document: &mut JsonObject) {
        for (key, value) in self.to_json() {
            let JsonValue::Object(incoming) = value else {
                continue;
            };
            let slot = document
                .entry(key)
                .or_insert_with(|| JsonValue::Object(JsonObject::new()));
            if !slot.is_object() {
                *slot = JsonValue::Object(JsonObject::new());
            }
            if let JsonValue::Object(existing) = slot {
                existing.extend(incoming);
            }
        }
    }
}
