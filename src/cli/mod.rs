//! CLI module
//!
//! Command-line interface for the pager.
//!
//! # Commands
//!
//! - `validate` - Check the page parameters of a query string
//! - `page` - Fetch one page of a collection
//! - `collections` - List configured collections
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{build_router, serve, JSONAPI_CONTENT_TYPE};
