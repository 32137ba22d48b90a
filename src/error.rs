//! Error types for cursor-pager
//!
//! Infrastructure failures only. Rejected page parameters are not errors here:
//! they are reported as [`crate::params::ValidationError`] values.

use thiserror::Error;

/// The main error type for cursor-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Query Errors
    // ============================================================================
    #[error("Query failed: {message}")]
    Query { message: String },

    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("Invalid field name: '{field}'")]
    InvalidField { field: String },

    #[error("Collection '{name}' not found")]
    CollectionNotFound { name: String },

    // ============================================================================
    // URL Errors
    // ============================================================================
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a query error
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
        }
    }

    /// Create a collection not found error
    pub fn collection_not_found(name: impl Into<String>) -> Self {
        Self::CollectionNotFound { name: name.into() }
    }

    /// HTTP status code to report this error with
    pub fn status_code(&self) -> u16 {
        match self {
            Error::CollectionNotFound { .. } | Error::FileNotFound { .. } => 404,
            _ => 500,
        }
    }
}

/// Result type alias for cursor-pager
pub type Result<T> = std::result::Result<T, Error>;
