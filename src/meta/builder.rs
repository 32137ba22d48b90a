//! Envelope construction

use super::query::to_query;
use super::types::{CursorMeta, PageEnvelope, PageInfo, PageLinks, PageMeta};
use crate::pagination::PageResult;
use crate::types::{CursorValue, JsonObject, JsonValue, QueryParams};

/// Builds `meta.page` and `links.prev` / `links.next` for a page
///
/// Links are `base_url` plus the original query parameters with `page`
/// replaced by the cursor for that direction and the page size.
#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    /// URL the links are built on, without a query string
    pub base_url: String,
    /// Query parameters of the current request
    pub query_params: QueryParams,
}

impl MetadataBuilder {
    /// Create a builder for links on `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            query_params: QueryParams::new(),
        }
    }

    /// Keep these query parameters in generated links
    #[must_use]
    pub fn with_query_params(mut self, query_params: QueryParams) -> Self {
        self.query_params = query_params;
        self
    }

    /// Build the envelope for `result`. Empty when pagination did not run.
    pub fn build<R>(&self, result: &PageResult<R>) -> PageEnvelope {
        if !result.is_paginated() {
            return PageEnvelope::default();
        }

        let cursor = CursorMeta {
            before: result.prev_cursor.clone(),
            after: result.next_cursor.clone(),
        };
        let cursor = (cursor.before.is_some() || cursor.after.is_some()).then_some(cursor);

        let meta = PageMeta {
            page: PageInfo {
                cursor,
                total: result.total_size.unwrap_or_default(),
                pages: result.total_pages.unwrap_or_default(),
            },
        };

        let links = PageLinks {
            prev: result
                .prev_cursor
                .as_ref()
                .map(|cursor| self.link("before", cursor, result.size)),
            next: result
                .next_cursor
                .as_ref()
                .map(|cursor| self.link("after", cursor, result.size)),
        };
        let links = (links.prev.is_some() || links.next.is_some()).then_some(links);

        PageEnvelope {
            meta: Some(meta),
            links,
        }
    }

    fn link(&self, direction: &str, cursor: &CursorValue, size: u64) -> String {
        let mut page = JsonObject::new();
        page.insert(direction.to_string(), cursor.to_json());
        page.insert("size".to_string(), JsonValue::from(size));

        let mut params = self.query_params.clone();
        params.insert("page".to_string(), JsonValue::Object(page));

        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.base_url, separator, to_query(&params))
    }
}

/// Build the envelope for `result` with links on `base_url`
pub fn build<R>(result: &PageResult<R>, base_url: &str, query_params: &QueryParams) -> PageEnvelope {
    MetadataBuilder::new(base_url)
        .with_query_params(query_params.clone())
        .build(result)
}
