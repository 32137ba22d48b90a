//! Cursor window computation

use super::types::{compare_cursors, CursorRecord, PageResult, QueryScope};
use crate::error::Result;
use crate::params::PageRequest;
use crate::types::{CursorValue, SortDirection};

/// Cursor-based paginator (JSON:API cursor pagination profile)
///
/// Windows are bounded by `page[after]` / `page[before]` on `cursor_field`.
/// Cursors handed back to the client are read from `result_field` of the
/// returned records, which defaults to `cursor_field`.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Field used for filtering and ordering in the query
    pub cursor_field: String,
    /// Field read off returned records to derive cursors
    pub result_field: String,
}

impl CursorPaginator {
    /// Create a paginator on `cursor_field`
    pub fn new(cursor_field: impl Into<String>) -> Self {
        let cursor_field = cursor_field.into();
        Self {
            result_field: cursor_field.clone(),
            cursor_field,
        }
    }

    /// Read cursors from a different field than the one queried
    #[must_use]
    pub fn with_result_field(mut self, result_field: impl Into<String>) -> Self {
        self.result_field = result_field.into();
        self
    }

    /// Run `request` against `scope`.
    ///
    /// The request must already be validated. Scope errors are returned
    /// unchanged.
    pub fn paginate<S: QueryScope>(
        &self,
        request: &PageRequest,
        scope: S,
    ) -> Result<PageResult<S::Record>> {
        if !request.is_enabled() {
            let rows = scope.materialize()?;
            tracing::debug!("Pagination disabled, returning {} rows", rows.len());
            return Ok(PageResult::unpaginated(rows));
        }

        let size = request.size;
        let total_size = scope.count()?;
        let total_pages = total_size.div_ceil(size);

        // request cursors stay text; scopes read them as the field's type
        let mut scope = scope;
        if let Some(after) = &request.after {
            let after = CursorValue::Text(after.clone());
            scope = scope.filter_greater_than(&self.cursor_field, &after);
        }
        if let Some(before) = &request.before {
            let before = CursorValue::Text(before.clone());
            scope = scope.filter_less_than(&self.cursor_field, &before);
        }
        let scope = scope.limit(size);

        let rows = if request.is_backward() {
            // nearest `size` rows below the boundary, presented ascending
            let mut rows = scope
                .order_by(&self.cursor_field, SortDirection::Desc)
                .materialize()?;
            rows.sort_by(|a, b| {
                compare_cursors(
                    a.cursor_value(&self.result_field).as_ref(),
                    b.cursor_value(&self.result_field).as_ref(),
                    SortDirection::Asc,
                )
            });
            rows
        } else {
            scope
                .order_by(&self.cursor_field, SortDirection::Asc)
                .materialize()?
        };

        let prev_cursor = rows
            .first()
            .and_then(|row| row.cursor_value(&self.result_field));
        let next_cursor = rows
            .last()
            .and_then(|row| row.cursor_value(&self.result_field));

        tracing::debug!(
            "Paginated {} of {} rows (size {}, {} pages) on '{}'",
            rows.len(),
            total_size,
            size,
            total_pages,
            self.cursor_field
        );

        Ok(PageResult {
            rows,
            size,
            total_size: Some(total_size),
            total_pages: Some(total_pages),
            next_cursor,
            prev_cursor,
        })
    }
}
