//! Pagination metadata
//!
//! Builds the `meta.page` / `links` envelope that accompanies a page of records,
//! plus the nested query-string helpers used to construct navigation links.

mod builder;
mod query;
mod types;

pub use builder::{build, MetadataBuilder};
pub use query::{parse_nested_query, to_query};
pub use types::{CursorMeta, PageEnvelope, PageInfo, PageLinks, PageMeta};

#[cfg(test)]
mod tests;
