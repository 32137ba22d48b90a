//! SQL query scope backed by a DuckDB connection

use crate::config::CollectionConfig;
use crate::error::{Error, Result};
use crate::pagination::QueryScope;
use crate::types::{CursorValue, JsonObject, JsonValue, SortDirection};
use duckdb::Connection;
use regex::Regex;
use std::sync::LazyLock;

/// Plain SQL identifier: letters, digits, underscore, not starting with a digit
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Relation a scope reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Table or view, optionally qualified (`db.schema.table`)
    Table(String),
    /// Arbitrary `SELECT` statement
    Query(String),
}

/// A lazily built `SELECT` over a DuckDB relation
///
/// Cursor values are bound as statement parameters; field and table names are
/// restricted to plain identifiers and quoted.
#[derive(Clone)]
pub struct DuckDbScope<'conn> {
    conn: &'conn Connection,
    source: Source,
    filters: Vec<(String, &'static str, CursorValue)>,
    order: Option<(String, SortDirection)>,
    limit: Option<u64>,
}

impl<'conn> DuckDbScope<'conn> {
    /// Scope over a table or view
    pub fn table(conn: &'conn Connection, table: impl Into<String>) -> Self {
        Self::new(conn, Source::Table(table.into()))
    }

    /// Scope over the rows of a custom query
    pub fn query(conn: &'conn Connection, sql: impl Into<String>) -> Self {
        Self::new(conn, Source::Query(sql.into()))
    }

    /// Scope over a configured collection
    pub fn for_collection(conn: &'conn Connection, collection: &CollectionConfig) -> Result<Self> {
        match (&collection.table, &collection.query) {
            (Some(table), None) => Ok(Self::table(conn, table.clone())),
            (None, Some(query)) => Ok(Self::query(conn, query.clone())),
            _ => Err(Error::invalid_value(
                format!("collections.{}", collection.name),
                "exactly one of 'table' or 'query' is required",
            )),
        }
    }

    fn new(conn: &'conn Connection, source: Source) -> Self {
        Self {
            conn,
            source,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// The relation this scope reads from
    pub fn source(&self) -> &Source {
        &self.source
    }

    fn from_clause(&self) -> Result<String> {
        match &self.source {
            Source::Table(table) => {
                let parts = table
                    .split('.')
                    .map(quote_identifier)
                    .collect::<Result<Vec<_>>>()?;
                Ok(parts.join("."))
            }
            Source::Query(sql) => Ok(format!("({}) AS q", sql.trim().trim_end_matches(';'))),
        }
    }

    fn where_clause(&self) -> Result<String> {
        if self.filters.is_empty() {
            return Ok(String::new());
        }
        let conditions = self
            .filters
            .iter()
            .map(|(field, op, _)| Ok(format!("{} {op} ?", quote_identifier(field)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(" WHERE {}", conditions.join(" AND ")))
    }

    fn binds(&self) -> impl Iterator<Item = &CursorValue> {
        self.filters.iter().map(|(_, _, value)| value)
    }

    /// SQL for `count`
    pub fn count_sql(&self) -> Result<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM {}{}",
            self.from_clause()?,
            self.where_clause()?
        ))
    }

    /// SQL for `materialize`
    pub fn select_sql(&self) -> Result<String> {
        let mut sql = format!("SELECT * FROM {}{}", self.from_clause()?, self.where_clause()?);
        if let Some((field, direction)) = &self.order {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                quote_identifier(field)?,
                direction.as_sql()
            ));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        Ok(sql)
    }

    fn push_filter(mut self, field: &str, op: &'static str, value: &CursorValue) -> Self {
        self.filters.push((field.to_string(), op, value.clone()));
        self
    }
}

impl std::fmt::Debug for DuckDbScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuckDbScope")
            .field("source", &self.source)
            .field("filters", &self.filters)
            .field("order", &self.order)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl QueryScope for DuckDbScope<'_> {
    type Record = JsonValue;

    fn count(&self) -> Result<u64> {
        let sql = self.count_sql()?;
        tracing::debug!("Executing count: {}", sql);

        let count: i64 = self
            .conn
            .query_row(&sql, duckdb::params_from_iter(self.binds()), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn filter_greater_than(self, field: &str, value: &CursorValue) -> Self {
        self.push_filter(field, ">", value)
    }

    fn filter_less_than(self, field: &str, value: &CursorValue) -> Self {
        self.push_filter(field, "<", value)
    }

    fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order = Some((field.to_string(), direction));
        self
    }

    fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn materialize(self) -> Result<Vec<JsonValue>> {
        let sql = self.select_sql()?;
        tracing::debug!("Executing query: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(duckdb::params_from_iter(self.binds()))?;
        let columns: Vec<String> = rows
            .as_ref()
            .map(|stmt| stmt.column_names())
            .unwrap_or_default();

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = JsonObject::new();
            for (index, name) in columns.iter().enumerate() {
                let value: duckdb::types::Value = row.get(index)?;
                record.insert(name.clone(), super::duckdb_value_to_json(value));
            }
            records.push(JsonValue::Object(record));
        }

        Ok(records)
    }
}

/// Validate and double-quote an identifier
fn quote_identifier(name: &str) -> Result<String> {
    if IDENTIFIER_REGEX.is_match(name) {
        Ok(format!("\"{name}\""))
    } else {
        Err(Error::invalid_field(name))
    }
}

/// Whether `name` is usable as a field or table name
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(|part| IDENTIFIER_REGEX.is_match(part))
}
