//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// JSON:API cursor pagination over DuckDB collections
#[derive(Parser, Debug)]
#[command(name = "cursor-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pager configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the page parameters of a query string
    Validate {
        /// Query string, e.g. "page[size]=3&page[after]=5"
        query: String,
    },

    /// Fetch one page of a configured collection
    Page {
        /// Collection name
        collection: String,

        /// Query string with page parameters
        #[arg(short, long, default_value = "")]
        query: String,

        /// Link prefix (defaults to the configured base_url)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// List configured collections
    Collections,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_command() {
        let cli = Cli::parse_from([
            "cursor-pager",
            "--config",
            "pager.yaml",
            "page",
            "items",
            "--query",
            "page[size]=3",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("pager.yaml")));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Page {
                collection,
                query,
                base_url,
            } => {
                assert_eq!(collection, "items");
                assert_eq!(query, "page[size]=3");
                assert!(base_url.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cursor-pager", "serve", "-p", "9000", "-f", "pretty", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(cli.command, Commands::Serve { port: 9000 }));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
