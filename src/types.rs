//! Common types used throughout cursor-pager
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Nested query parameters (`{"filter": {"name": "x"}, "page": {"size": "3"}}`)
pub type QueryParams = JsonObject;

// ============================================================================
// Sort Direction
// ============================================================================

/// Ordering applied to a query scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// ============================================================================
// Cursor Value
// ============================================================================

/// A cursor: the ordering field value of a boundary row.
///
/// Record cursors keep their JSON type. Numbers order numerically (integers
/// and floats together) and text orders lexically; every number sorts before
/// every text value. Cursors taken from a request arrive as
/// [`CursorValue::Text`] and are coerced against record values by
/// [`CursorValue::compare`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CursorValue {
    /// Read a cursor from a JSON field value. Null, booleans and containers
    /// have no cursor.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => n
                .as_i64()
                .map(CursorValue::Int)
                .or_else(|| n.as_f64().map(CursorValue::Float)),
            JsonValue::String(s) => Some(CursorValue::Text(s.clone())),
            _ => None,
        }
    }

    /// Convert to a JSON value (number or string)
    pub fn to_json(&self) -> JsonValue {
        match self {
            CursorValue::Int(i) => JsonValue::from(*i),
            CursorValue::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number)
            }
            CursorValue::Text(s) => JsonValue::String(s.clone()),
        }
    }

    /// Compare with `other`, reading text as a number when the other side is
    /// numeric and the text parses as one.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CursorValue::Text(text), CursorValue::Int(_) | CursorValue::Float(_)) => {
                match Self::coerce(text, other) {
                    Some(number) => number.cmp(other),
                    None => self.cmp(other),
                }
            }
            (CursorValue::Int(_) | CursorValue::Float(_), CursorValue::Text(text)) => {
                match Self::coerce(text, self) {
                    Some(number) => self.cmp(&number),
                    None => self.cmp(other),
                }
            }
            _ => self.cmp(other),
        }
    }

    fn coerce(text: &str, like: &Self) -> Option<Self> {
        let text = text.trim();
        let int = match like {
            CursorValue::Int(_) => text.parse::<i64>().ok().map(CursorValue::Int),
            _ => None,
        };
        int.or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(CursorValue::Float)
        })
    }

    fn rank(&self) -> u8 {
        match self {
            CursorValue::Int(_) | CursorValue::Float(_) => 0,
            CursorValue::Text(_) => 1,
        }
    }
}

impl Ord for CursorValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CursorValue::Int(a), CursorValue::Int(b)) => a.cmp(b),
            (CursorValue::Float(a), CursorValue::Float(b)) => a.total_cmp(b),
            (CursorValue::Int(a), CursorValue::Float(b)) => (*a as f64).total_cmp(b),
            (CursorValue::Float(a), CursorValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (CursorValue::Text(a), CursorValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CursorValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CursorValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CursorValue {}

impl fmt::Display for CursorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorValue::Int(i) => write!(f, "{i}"),
            CursorValue::Float(x) => write!(f, "{x}"),
            CursorValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CursorValue {
    fn from(value: i64) -> Self {
        CursorValue::Int(value)
    }
}

impl From<f64> for CursorValue {
    fn from(value: f64) -> Self {
        CursorValue::Float(value)
    }
}

impl From<&str> for CursorValue {
    fn from(value: &str) -> Self {
        CursorValue::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_display_round_trips() {
        for raw in ["3", "042", "2024-01-01T00:00:00Z", "-1"] {
            assert_eq!(CursorValue::from(raw).to_string(), raw);
        }
        assert_eq!(CursorValue::Float(9.5).to_string(), "9.5");
    }

    #[test]
    fn test_cursor_from_json_keeps_type() {
        assert_eq!(CursorValue::from_json(&json!(5)), Some(CursorValue::Int(5)));
        assert!(matches!(
            CursorValue::from_json(&json!("7")),
            Some(CursorValue::Text(s)) if s == "7"
        ));
        assert!(matches!(
            CursorValue::from_json(&json!(1.5)),
            Some(CursorValue::Float(f)) if f == 1.5
        ));
        assert_eq!(CursorValue::from_json(&json!(null)), None);
        assert_eq!(CursorValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_cursor_ordering() {
        assert!(CursorValue::Int(9) < CursorValue::Int(10));
        assert!(CursorValue::Float(9.5) < CursorValue::Float(10.5));
        assert!(CursorValue::Int(9) < CursorValue::Float(9.5));
        assert!(CursorValue::Float(10.5) > CursorValue::Int(10));
        assert!(CursorValue::Text("b".into()) > CursorValue::Text("a".into()));
        assert!(CursorValue::Text("9".into()) > CursorValue::Text("10".into()));
        assert!(CursorValue::Int(100) < CursorValue::Text("a".into()));
    }

    #[test]
    fn test_cursor_compare_coerces_request_text() {
        let text = |s: &str| CursorValue::from(s);

        assert_eq!(CursorValue::Int(10).compare(&text("9")), Ordering::Greater);
        assert_eq!(CursorValue::Int(3).compare(&text("3")), Ordering::Equal);
        assert_eq!(CursorValue::Float(10.5).compare(&text("9.5")), Ordering::Greater);
        assert_eq!(CursorValue::Int(2).compare(&text("2.5")), Ordering::Less);
        assert_eq!(text("9").compare(&CursorValue::Int(10)), Ordering::Less);

        // text on both sides stays lexical
        assert_eq!(text("10").compare(&text("9")), Ordering::Less);
        // non-numeric text still sorts after numbers
        assert_eq!(CursorValue::Int(5).compare(&text("abc")), Ordering::Less);
    }

    #[test]
    fn test_cursor_serializes_untagged() {
        assert_eq!(serde_json::to_value(CursorValue::Int(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(CursorValue::Float(1.5)).unwrap(), json!(1.5));
        assert_eq!(
            serde_json::to_value(CursorValue::Text("x".into())).unwrap(),
            json!("x")
        );
    }

    #[test]
    fn test_sort_direction_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }
}
