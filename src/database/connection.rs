//! Opening DuckDB connections

use crate::error::{Error, Result};
use duckdb::Connection;

/// Open a DuckDB database file, or an in-memory database for `:memory:`
pub fn open_database(path: &str) -> Result<Connection> {
    let conn = if path == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(path)
    };

    conn.map_err(|e| Error::config(format!("Failed to open DuckDB database '{path}': {e}")))
}

/// Run setup statements (CREATE, INSTALL/LOAD, ATTACH, ...) in order
pub fn run_init(conn: &Connection, statements: &[String]) -> Result<()> {
    for statement in statements {
        tracing::debug!("Running init statement: {}", statement);
        conn.execute_batch(statement)
            .map_err(|e| Error::config(format!("Init statement failed: {e}")))?;
    }
    Ok(())
}
