// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # cursor-pager
//!
//! JSON:API cursor pagination
//! (`https://jsonapi.org/profiles/ethanresnick/cursor-pagination/`) over any
//! ordered, filterable query scope.
//!
//! ## Features
//!
//! - **Parameter validation**: `page[size]`, `page[before]`, `page[after]` checked
//!   in priority order, failures reported as JSON:API error objects
//! - **Cursor windowing**: keyset pagination in both directions, rows always
//!   returned in ascending order
//! - **Metadata**: totals, page count, cursors and `prev`/`next` links that keep
//!   every other query parameter
//! - **DuckDB scopes**: page tables, views or custom queries
//! - **CLI and HTTP server**: `cursor-pager page`, `cursor-pager serve`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cursor_pager::{MemoryScope, PageEngine};
//! use serde_json::json;
//!
//! let scope: MemoryScope = MemoryScope::new((1..=10).map(|id| json!({ "id": id })).collect());
//! let outcome = PageEngine::new("id").run_query("page[size]=3", scope, "/items")?;
//! let document = outcome.into_document()?;
//! // {"data": [...], "meta": {"page": {...}}, "links": {"prev": ..., "next": ...}}
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   query string
//!        │
//! ┌──────▼──────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │ParameterValidator├──►CursorPaginator   ├──►MetadataBuilder  │
//! │ PageRequest      │   │ QueryScope      │   │ meta + links    │
//! │ ValidationError  │   │ Memory / DuckDB │   │                 │
//! └──────────────────┘   └─────────────────┘   └─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Page parameter validation
pub mod params;

/// Cursor windowing over query scopes
pub mod pagination;

/// Pagination metadata and links
pub mod meta;

/// DuckDB query scopes
pub mod database;

/// YAML configuration
pub mod config;

/// Request pipeline
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, CollectionConfig, PagerConfig};
pub use engine::{PageEngine, PageOutcome};
pub use meta::{MetadataBuilder, PageEnvelope};
pub use pagination::{CursorPaginator, CursorRecord, MemoryScope, PageResult, QueryScope};
pub use params::{PageRequest, ParameterValidator, RawPageParams, ValidationError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
