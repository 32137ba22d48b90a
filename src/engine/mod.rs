//! Page request pipeline
//!
//! Runs the three stages in order for one request:
//! validate the raw `page[...]` parameters, window the scope, build the
//! `meta`/`links` envelope.

mod types;

pub use types::PageOutcome;

use crate::config::CollectionConfig;
use crate::error::Result;
use crate::meta::MetadataBuilder;
use crate::pagination::{CursorPaginator, QueryScope};
use crate::params::{ParameterValidator, RawPageParams};
use crate::types::QueryParams;

/// Validator and paginator configured for one collection
#[derive(Debug, Clone)]
pub struct PageEngine {
    validator: ParameterValidator,
    paginator: CursorPaginator,
}

impl PageEngine {
    /// Create an engine windowing on `cursor_field`
    pub fn new(cursor_field: impl Into<String>) -> Self {
        Self {
            validator: ParameterValidator::new(),
            paginator: CursorPaginator::new(cursor_field),
        }
    }

    /// Create an engine for a configured collection
    pub fn from_collection(collection: &CollectionConfig, max_size: Option<u64>) -> Self {
        let engine = Self::new(collection.cursor_field.clone())
            .with_result_field(collection.result_field());
        match max_size {
            Some(max_size) => engine.with_max_size(max_size),
            None => engine,
        }
    }

    /// Read cursors from `result_field` instead of the cursor field
    #[must_use]
    pub fn with_result_field(mut self, result_field: impl Into<String>) -> Self {
        self.paginator = self.paginator.with_result_field(result_field);
        self
    }

    /// Reject `page[size]` above `max_size`
    #[must_use]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.validator = self.validator.with_max_size(max_size);
        self
    }

    /// Run a request given its parsed query parameters
    ///
    /// Rejected requests never touch the scope.
    pub fn run<S: QueryScope>(
        &self,
        query: &QueryParams,
        scope: S,
        base_url: &str,
    ) -> Result<PageOutcome<S::Record>> {
        let raw = RawPageParams::from_query_params(query);
        let (request, errors) = self.validator.validate(&raw);
        if !errors.is_empty() {
            return Ok(PageOutcome::Rejected(errors));
        }

        let result = self.paginator.paginate(&request, scope)?;
        let envelope = MetadataBuilder::new(base_url)
            .with_query_params(query.clone())
            .build(&result);

        tracing::debug!(
            "Served page of {} rows (size {}, total {:?})",
            result.len(),
            result.size,
            result.total_size
        );

        Ok(PageOutcome::Page {
            rows: result.rows,
            envelope,
        })
    }

    /// Run a request given its raw URL query string
    pub fn run_query<S: QueryScope>(
        &self,
        query: &str,
        scope: S,
        base_url: &str,
    ) -> Result<PageOutcome<S::Record>> {
        self.run(&crate::meta::parse_nested_query(query), scope, base_url)
    }
}

#[cfg(test)]
mod tests;
