//! In-memory query scope

use super::types::{compare_cursors, CursorRecord, QueryScope};
use crate::error::Result;
use crate::types::{CursorValue, JsonValue, SortDirection};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    GreaterThan,
    LessThan,
}

#[derive(Debug, Clone)]
struct Filter {
    field: String,
    comparison: Comparison,
    value: CursorValue,
}

impl Filter {
    /// Records without the field never match. The filter value is compared
    /// as the record's type where it parses as one.
    fn matches<R: CursorRecord>(&self, record: &R) -> bool {
        let Some(actual) = record.cursor_value(&self.field) else {
            return false;
        };
        let ordering = actual.compare(&self.value);
        match self.comparison {
            Comparison::GreaterThan => ordering == Ordering::Greater,
            Comparison::LessThan => ordering == Ordering::Less,
        }
    }
}

/// A query scope over records held in memory
///
/// Filters, ordering and limit are recorded lazily and applied in SQL order
/// (filter, then order, then limit) on `materialize`.
#[derive(Debug, Clone)]
pub struct MemoryScope<R = JsonValue> {
    records: Vec<R>,
    filters: Vec<Filter>,
    order: Option<(String, SortDirection)>,
    limit: Option<u64>,
}

impl<R: CursorRecord> MemoryScope<R> {
    /// Scope over `records`, in their given order
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Drop records that fail `predicate` (a pre-existing filter)
    #[must_use]
    pub fn retain(mut self, predicate: impl FnMut(&R) -> bool) -> Self {
        self.records.retain(predicate);
        self
    }

    fn matches(&self, record: &R) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    fn push_filter(mut self, field: &str, comparison: Comparison, value: &CursorValue) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            comparison,
            value: value.clone(),
        });
        self
    }
}

impl<R: CursorRecord> QueryScope for MemoryScope<R> {
    type Record = R;

    fn count(&self) -> Result<u64> {
        Ok(self.records.iter().filter(|r| self.matches(r)).count() as u64)
    }

    fn filter_greater_than(self, field: &str, value: &CursorValue) -> Self {
        self.push_filter(field, Comparison::GreaterThan, value)
    }

    fn filter_less_than(self, field: &str, value: &CursorValue) -> Self {
        self.push_filter(field, Comparison::LessThan, value)
    }

    fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order = Some((field.to_string(), direction));
        self
    }

    fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn materialize(self) -> Result<Vec<R>> {
        let Self {
            records,
            filters,
            order,
            limit,
        } = self;

        let mut rows: Vec<R> = records
            .into_iter()
            .filter(|r| filters.iter().all(|f| f.matches(r)))
            .collect();

        if let Some((field, direction)) = &order {
            rows.sort_by(|a, b| {
                compare_cursors(
                    a.cursor_value(field).as_ref(),
                    b.cursor_value(field).as_ref(),
                    *direction,
                )
            });
        }

        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(rows)
    }
}
