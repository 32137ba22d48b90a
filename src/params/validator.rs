//! Priority-ordered page parameter checks

use super::types::{PageRequest, RawPageParams, ValidationError};

/// Validates raw page parameters into a [`PageRequest`]
///
/// Checks, first failure wins:
/// 1. no `page[...]` parameter: pagination disabled, no error
/// 2. `page[size]` must parse to a positive integer (then the optional maximum)
/// 3. `sort` is rejected
/// 4. `page[before]` and `page[after]` together are rejected
/// 5. `page[before]` must not be blank
/// 6. `page[after]` must not be blank
#[derive(Debug, Clone, Default)]
pub struct ParameterValidator {
    /// Largest accepted `page[size]`
    pub max_size: Option<u64>,
}

impl ParameterValidator {
    /// Create a validator without a size limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject page sizes above `max_size`
    #[must_use]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Validate raw parameters. The error list is empty iff the request is valid.
    pub fn validate(&self, raw: &RawPageParams) -> (PageRequest, Vec<ValidationError>) {
        let mut request = PageRequest::disabled();
        let error = self.check(raw, &mut request);

        if let Some(error) = &error {
            tracing::debug!(
                "Rejected page parameters ({}): {}",
                error.title,
                error.detail
            );
        }

        (request, error.into_iter().collect())
    }

    fn check(&self, raw: &RawPageParams, request: &mut PageRequest) -> Option<ValidationError> {
        if !raw.has_page_params() {
            return None;
        }

        let raw_size = raw.size.as_deref().unwrap_or_default();
        let size = lenient_int(raw_size);
        if size < 1 {
            return Some(ValidationError::invalid_size(raw_size));
        }
        let size = size as u64;
        if let Some(max_size) = self.max_size {
            if size > max_size {
                return Some(ValidationError::max_size_exceeded(raw_size, max_size));
            }
        }
        request.size = size;

        if let Some(sort) = &raw.sort {
            return Some(ValidationError::unsupported_sort(sort));
        }

        match (&raw.before, &raw.after) {
            (Some(before), Some(after)) => {
                Some(ValidationError::range_not_supported(before, after))
            }
            (Some(before), None) => {
                request.before = Some(before.clone());
                is_blank(before).then(|| ValidationError::blank_cursor("page[before]", before))
            }
            (None, Some(after)) => {
                request.after = Some(after.clone());
                is_blank(after).then(|| ValidationError::blank_cursor("page[after]", after))
            }
            (None, None) => None,
        }
    }
}

/// Validate with the default (unbounded) validator
pub fn validate(raw: &RawPageParams) -> (PageRequest, Vec<ValidationError>) {
    ParameterValidator::new().validate(raw)
}

/// Lenient integer parsing: optional leading whitespace and sign, then as many
/// digits as follow. Anything unparseable is 0.
pub(crate) fn lenient_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -value
    } else {
        value
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
