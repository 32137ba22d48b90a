//! Page parameter types
//!
//! Raw client input, the validated request and JSON:API error objects.

use crate::meta::parse_nested_query;
use crate::types::{JsonValue, QueryParams};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Base URI of the JSON:API cursor pagination profile
pub const PROFILE_URI: &str = "https://jsonapi.org/profiles/ethanresnick/cursor-pagination/";

// ============================================================================
// Raw Parameters
// ============================================================================

/// Page parameters exactly as the client sent them
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawPageParams {
    /// `page[size]`
    #[serde(default)]
    pub size: Option<String>,
    /// Top-level `sort`
    #[serde(default)]
    pub sort: Option<String>,
    /// `page[before]`
    #[serde(default)]
    pub before: Option<String>,
    /// `page[after]`
    #[serde(default)]
    pub after: Option<String>,
}

impl RawPageParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `page[size]`
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set `sort`
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set `page[before]`
    #[must_use]
    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    /// Set `page[after]`
    #[must_use]
    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    /// Whether any `page[...]` parameter was supplied
    pub fn has_page_params(&self) -> bool {
        self.size.is_some() || self.before.is_some() || self.after.is_some()
    }

    /// Extract page parameters from a raw URL query string
    /// (`page[size]=3&page[after]=5&sort=name`)
    pub fn from_query(query: &str) -> Self {
        Self::from_query_params(&parse_nested_query(query))
    }

    /// Extract page parameters from already-parsed nested query parameters
    pub fn from_query_params(params: &QueryParams) -> Self {
        let page = params.get("page").and_then(JsonValue::as_object);
        let page_value = |key: &str| page.and_then(|p| p.get(key)).map(raw_string);

        Self {
            size: page_value("size"),
            sort: params.get("sort").map(raw_string),
            before: page_value("before"),
            after: page_value("after"),
        }
    }
}

/// Render a query value back to the text the client sent
fn raw_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Page Request
// ============================================================================

/// Validated pagination intent for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// Page size; 0 means pagination is disabled
    pub size: u64,
    /// Return rows strictly before this cursor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Return rows strictly after this cursor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl PageRequest {
    /// A request with pagination disabled
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A first-page request of the given size
    pub fn new(size: u64) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set the `before` cursor
    #[must_use]
    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    /// Set the `after` cursor
    #[must_use]
    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    /// Whether pagination was requested
    pub fn is_enabled(&self) -> bool {
        self.size > 0
    }

    /// Whether the window is anchored on `before` alone
    pub fn is_backward(&self) -> bool {
        self.before.is_some() && self.after.is_none()
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Category of a rejected page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Malformed or missing `page[size]`, blank `page[before]` / `page[after]`
    InvalidParameter,
    /// Any `sort` parameter
    UnsupportedSort,
    /// `page[before]` and `page[after]` together
    RangePaginationNotSupported,
    /// `page[size]` above the configured maximum
    MaxSizeExceeded,
}

impl ErrorKind {
    /// JSON:API error title
    pub fn title(self) -> &'static str {
        match self {
            ErrorKind::InvalidParameter => "Invalid Parameter.",
            ErrorKind::UnsupportedSort => "Unsupported Sort.",
            ErrorKind::RangePaginationNotSupported => "Range Pagination Not Supported.",
            ErrorKind::MaxSizeExceeded => "Max Page Size Exceeded.",
        }
    }

    /// Profile error type URI, if the profile defines one
    pub fn type_uri(self) -> Option<String> {
        let slug = match self {
            ErrorKind::InvalidParameter => return None,
            ErrorKind::UnsupportedSort => "unsupported-sort",
            ErrorKind::RangePaginationNotSupported => "range-pagination-not-supported",
            ErrorKind::MaxSizeExceeded => "max-size-exceeded",
        };
        Some(format!("{PROFILE_URI}{slug}"))
    }
}

/// Which query parameter caused an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSource {
    pub parameter: String,
}

/// Machine-readable error type links
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorLinks {
    #[serde(rename = "type")]
    pub types: Vec<String>,
}

/// A rejected page parameter, shaped as a JSON:API error object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    #[serde(skip)]
    pub kind: ErrorKind,
    /// HTTP status as a string, per JSON:API
    pub status: String,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ErrorLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonValue>,
}

impl ValidationError {
    fn new(kind: ErrorKind, detail: String) -> Self {
        Self {
            kind,
            status: "400".to_string(),
            title: kind.title().to_string(),
            detail,
            source: None,
            links: kind.type_uri().map(|uri| ErrorLinks { types: vec![uri] }),
            meta: None,
        }
    }

    fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.source = Some(ErrorSource {
            parameter: parameter.into(),
        });
        self
    }

    /// `page[size]` is not a positive integer
    pub fn invalid_size(raw: &str) -> Self {
        Self::new(
            ErrorKind::InvalidParameter,
            format!("page[size] must be a positive integer; got '{raw}'"),
        )
        .with_parameter("page[size]")
    }

    /// A cursor parameter (`page[before]` / `page[after]`) is blank
    pub fn blank_cursor(parameter: &str, raw: &str) -> Self {
        Self::new(
            ErrorKind::InvalidParameter,
            format!("{parameter} must not be blank; got '{raw}'"),
        )
        .with_parameter(parameter)
    }

    /// A `sort` parameter was supplied
    pub fn unsupported_sort(raw: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedSort,
            format!("sort is not supported; records are ordered by cursor. Got '{raw}'"),
        )
        .with_parameter("sort")
    }

    /// Both `page[before]` and `page[after]` were supplied
    pub fn range_not_supported(before: &str, after: &str) -> Self {
        Self::new(
            ErrorKind::RangePaginationNotSupported,
            format!(
                "page[before] and page[after] cannot be combined; got before '{before}' and after '{after}'"
            ),
        )
    }

    /// `page[size]` is above the configured maximum
    pub fn max_size_exceeded(raw: &str, max_size: u64) -> Self {
        let mut error = Self::new(
            ErrorKind::MaxSizeExceeded,
            format!("page[size] must not exceed {max_size}; got '{raw}'"),
        )
        .with_parameter("page[size]");
        error.meta = Some(json!({ "page": { "maxSize": max_size } }));
        error
    }

    /// The parameter this error points at, if any
    pub fn parameter(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.parameter.as_str())
    }
}
