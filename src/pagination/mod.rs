//! Pagination module
//!
//! Cursor windows over an abstract, orderable query scope.
//!
//! # Overview
//!
//! [`CursorPaginator`] counts the scope, narrows it with `page[after]` /
//! `page[before]`, limits it to the page size and reads the boundary cursors
//! off the returned rows. Anything implementing [`QueryScope`] can be paged:
//! [`MemoryScope`] for in-process collections and
//! [`crate::database::DuckDbScope`] for SQL relations.

mod memory;
mod paginator;
mod types;

pub use memory::MemoryScope;
pub use paginator::CursorPaginator;
pub use types::{CursorRecord, PageResult, QueryScope};
