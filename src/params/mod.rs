//! Page parameter validation
//!
//! Turns raw `page[size]`, `page[before]`, `page[after]` and `sort` values into
//! a typed [`PageRequest`].
//!
//! # Overview
//!
//! Checks run in a fixed priority order and stop at the first failure, so a
//! rejected request carries exactly one [`ValidationError`]. Validation never
//! returns `Err`: an empty error list means the request is valid.

mod types;
mod validator;

pub use types::{
    ErrorKind, ErrorLinks, ErrorSource, PageRequest, RawPageParams, ValidationError, PROFILE_URI,
};
pub use validator::{validate, ParameterValidator};
