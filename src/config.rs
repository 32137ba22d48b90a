//! Configuration for the pager binary
//!
//! A YAML document names the DuckDB database, the setup statements to run
//! against it and the collections that can be paged.
//!
//! ```yaml
//! database: ":memory:"
//! init:
//!   - CREATE TABLE items AS SELECT range AS id FROM range(1, 11)
//! base_url: http://localhost:8080
//! max_page_size: 100
//! collections:
//!   - name: items
//!     table: items
//!     cursor_field: id
//! ```

use crate::database::is_valid_identifier;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete pager configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    /// DuckDB database path, or `:memory:`
    #[serde(default = "default_database")]
    pub database: String,

    /// SQL statements run once after opening the database
    #[serde(default)]
    pub init: Vec<String>,

    /// Absolute URL prefix for pagination links
    #[serde(default)]
    pub base_url: Option<String>,

    /// Upper bound for `page[size]`
    #[serde(default)]
    pub max_page_size: Option<u64>,

    /// Pageable collections
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

fn default_database() -> String {
    ":memory:".to_string()
}

impl PagerConfig {
    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Result<&CollectionConfig> {
        self.collections
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::collection_not_found(name))
    }

    /// Link prefix for a collection: `{base_url}/collections/{name}`
    pub fn collection_url(&self, name: &str) -> String {
        let base = self.base_url.as_deref().unwrap_or("").trim_end_matches('/');
        format!("{base}/collections/{name}")
    }
}

// ============================================================================
// Collections
// ============================================================================

/// A named relation with its cursor column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Name used on the command line and in URLs
    pub name: String,

    /// Table or view to read
    #[serde(default)]
    pub table: Option<String>,

    /// Custom `SELECT` to read instead of a table
    #[serde(default)]
    pub query: Option<String>,

    /// Column rows are windowed on
    pub cursor_field: String,

    /// Column cursors are read from (defaults to `cursor_field`)
    #[serde(default)]
    pub result_field: Option<String>,
}

impl CollectionConfig {
    /// Column cursors are read from
    pub fn result_field(&self) -> &str {
        self.result_field.as_deref().unwrap_or(&self.cursor_field)
    }

    /// Summary for listings
    pub fn summary(&self) -> JsonValue {
        json!({
            "name": self.name,
            "table": self.table,
            "query": self.query,
            "cursor_field": self.cursor_field,
            "result_field": self.result_field(),
        })
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a config file
pub fn load_config(path: impl AsRef<Path>) -> Result<PagerConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load and validate a config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<PagerConfig> {
    let config: PagerConfig = serde_yaml::from_str(yaml)?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &PagerConfig) -> Result<()> {
    if config.database.is_empty() {
        return Err(Error::missing_field("database"));
    }

    if let Some(base_url) = &config.base_url {
        url::Url::parse(base_url)?;
    }

    if config.max_page_size == Some(0) {
        return Err(Error::invalid_value("max_page_size", "must be at least 1"));
    }

    if config.collections.is_empty() {
        return Err(Error::config("Config must define at least one collection"));
    }

    let names: HashSet<_> = config.collections.iter().map(|c| &c.name).collect();
    if names.len() != config.collections.len() {
        return Err(Error::config("Duplicate collection names found"));
    }

    for collection in &config.collections {
        validate_collection(collection)?;
    }

    Ok(())
}

fn validate_collection(collection: &CollectionConfig) -> Result<()> {
    if collection.name.is_empty() {
        return Err(Error::config("Collection name cannot be empty"));
    }

    let field = |name: &str| format!("collections.{}.{}", collection.name, name);

    match (&collection.table, &collection.query) {
        (Some(table), None) if !is_valid_identifier(table) => {
            return Err(Error::invalid_value(field("table"), "not a valid table name"));
        }
        (Some(_), None) => {}
        (None, Some(query)) if query.trim().is_empty() => {
            return Err(Error::invalid_value(field("query"), "cannot be empty"));
        }
        (None, Some(_)) => {}
        _ => {
            return Err(Error::config(format!(
                "Collection '{}' needs exactly one of 'table' or 'query'",
                collection.name
            )));
        }
    }

    for (key, value) in [
        ("cursor_field", Some(collection.cursor_field.as_str())),
        ("result_field", collection.result_field.as_deref()),
    ] {
        if let Some(value) = value {
            if value.contains('.') || !is_valid_identifier(value) {
                return Err(Error::invalid_value(field(key), "not a valid column name"));
            }
        }
    }

    Ok(())
}
