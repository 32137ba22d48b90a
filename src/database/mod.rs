//! DuckDB query scopes
//!
//! Pages over any relation DuckDB can read: native tables, views, attached
//! PostgreSQL / MySQL / SQLite databases, or a custom `SELECT`.

mod connection;
mod scope;
mod value;

pub use connection::{open_database, run_init};
pub use scope::{DuckDbScope, Source};
pub use value::duckdb_value_to_json;

pub(crate) use scope::is_valid_identifier;
