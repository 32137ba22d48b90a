//! Engine types
//!
//! Outcome of running one page request through the pipeline.

use crate::error::Result;
use crate::meta::PageEnvelope;
use crate::params::ValidationError;
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;

/// Result of a page request
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<R> {
    /// Parameters were valid and the page was fetched
    Page {
        /// Rows of the page, in ascending cursor order
        rows: Vec<R>,
        /// Pagination `meta` and `links`
        envelope: PageEnvelope,
    },
    /// Parameters were rejected; no query ran
    Rejected(Vec<ValidationError>),
}

impl<R> PageOutcome<R> {
    /// Check if the request was rejected
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// HTTP status for the rendered document
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Page { .. } => 200,
            Self::Rejected(_) => 400,
        }
    }

    /// Rows of an accepted page
    pub fn rows(&self) -> Option<&[R]> {
        match self {
            Self::Page { rows, .. } => Some(rows),
            Self::Rejected(_) => None,
        }
    }

    /// Validation errors of a rejected request
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Page { .. } => &[],
            Self::Rejected(errors) => errors,
        }
    }
}

impl<R: Serialize> PageOutcome<R> {
    /// Render as a JSON:API top-level document
    ///
    /// `{data, meta?, links?}` for a page, `{errors}` for a rejection.
    pub fn into_document(self) -> Result<JsonValue> {
        let mut document = JsonObject::new();
        match self {
            Self::Page { rows, envelope } => {
                document.insert("data".to_string(), serde_json::to_value(rows)?);
                envelope.merge_into(&mut document);
            }
            Self::Rejected(errors) => {
                document.insert("errors".to_string(), serde_json::to_value(errors)?);
            }
        }
        Ok(JsonValue::Object(document))
    }
}
