//! Pagination types and traits
//!
//! Defines the scope abstraction the paginator runs against and the page it
//! produces.

use crate::error::Result;
use crate::types::{CursorValue, JsonObject, JsonValue, SortDirection};
use std::cmp::Ordering;

/// Result of one paginate call
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<R> {
    /// Rows of the page, ascending by cursor when paginated
    pub rows: Vec<R>,
    /// Requested page size; 0 when pagination is disabled
    pub size: u64,
    /// Records in the scope before cursor filters and limit
    pub total_size: Option<u64>,
    /// `ceil(total_size / size)`
    pub total_pages: Option<u64>,
    /// Cursor of the last row
    pub next_cursor: Option<CursorValue>,
    /// Cursor of the first row
    pub prev_cursor: Option<CursorValue>,
}

impl<R> PageResult<R> {
    /// A result that returns the whole scope
    pub fn unpaginated(rows: Vec<R>) -> Self {
        Self {
            rows,
            size: 0,
            total_size: None,
            total_pages: None,
            next_cursor: None,
            prev_cursor: None,
        }
    }

    /// Whether pagination ran for this result
    pub fn is_paginated(&self) -> bool {
        self.size > 0
    }

    /// Number of rows on this page
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the page has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A record that exposes fields by name for cursor extraction
pub trait CursorRecord {
    /// Value of `field` as a cursor, if present
    fn cursor_value(&self, field: &str) -> Option<CursorValue>;
}

impl CursorRecord for JsonValue {
    fn cursor_value(&self, field: &str) -> Option<CursorValue> {
        self.get(field).and_then(CursorValue::from_json)
    }
}

impl CursorRecord for JsonObject {
    fn cursor_value(&self, field: &str) -> Option<CursorValue> {
        self.get(field).and_then(CursorValue::from_json)
    }
}

/// A filterable, orderable, limitable query over records
///
/// Builder methods consume and return the scope; they describe the query and
/// do not execute it. `count` and `materialize` execute and may block. Limit
/// is applied after ordering no matter which was called first.
pub trait QueryScope: Sized {
    /// Record handle returned by `materialize`
    type Record: CursorRecord;

    /// Number of records matching the current filters, ignoring any limit
    fn count(&self) -> Result<u64>;

    /// Keep records whose `field` is strictly greater than `value`
    #[must_use]
    fn filter_greater_than(self, field: &str, value: &CursorValue) -> Self;

    /// Keep records whose `field` is strictly less than `value`
    #[must_use]
    fn filter_less_than(self, field: &str, value: &CursorValue) -> Self;

    /// Order by `field`
    #[must_use]
    fn order_by(self, field: &str, direction: SortDirection) -> Self;

    /// Return at most `limit` records
    #[must_use]
    fn limit(self, limit: u64) -> Self;

    /// Execute the query
    fn materialize(self) -> Result<Vec<Self::Record>>;
}

/// Compare optional cursors in `direction`, missing values last
pub(crate) fn compare_cursors(
    a: Option<&CursorValue>,
    b: Option<&CursorValue>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
