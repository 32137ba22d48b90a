//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, PagerConfig};
use crate::database::{open_database, run_init, DuckDbScope};
use crate::engine::PageEngine;
use crate::error::{Error, Result};
use crate::params::{ParameterValidator, RawPageParams};
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Validate { query } => self.validate(query),
            Commands::Page {
                collection,
                query,
                base_url,
            } => self.page(collection, query, base_url.as_deref()),
            Commands::Collections => self.collections(),
            Commands::Serve { port } => {
                let config = self.load_config()?;
                crate::cli::serve(config, *port).await
            }
        }
    }

    /// Load the pager configuration
    fn load_config(&self) -> Result<PagerConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -c flag)"))?;
        load_config(path)
    }

    /// Validate page parameters
    ///
    /// Uses the configured `max_page_size` when a config file is given.
    fn validate(&self, query: &str) -> Result<()> {
        let mut validator = ParameterValidator::new();
        if self.cli.config.is_some() {
            if let Some(max_size) = self.load_config()?.max_page_size {
                validator = validator.with_max_size(max_size);
            }
        }

        let raw = RawPageParams::from_query(query);
        let (request, errors) = validator.validate(&raw);

        if errors.is_empty() {
            self.output_message(&json!({
                "type": "PAGE_REQUEST",
                "paginated": request.is_enabled(),
                "request": request
            }));
        } else {
            self.output_message(&json!({
                "type": "ERRORS",
                "errors": errors
            }));
        }

        Ok(())
    }

    /// Fetch one page and print the document
    fn page(&self, name: &str, query: &str, base_url: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let collection = config.collection(name)?;

        let conn = open_database(&config.database)?;
        run_init(&conn, &config.init)?;

        let scope = DuckDbScope::for_collection(&conn, collection)?;
        let base_url = base_url.map_or_else(|| config.collection_url(name), str::to_string);

        let outcome = PageEngine::from_collection(collection, config.max_page_size)
            .run_query(query, scope, &base_url)?;
        if outcome.is_rejected() {
            tracing::warn!("Page parameters rejected for collection '{}'", name);
        }

        self.output_message(&outcome.into_document()?);
        Ok(())
    }

    /// List configured collections
    fn collections(&self) -> Result<()> {
        let config = self.load_config()?;
        let collections: Vec<Value> = config
            .collections
            .iter()
            .map(crate::config::CollectionConfig::summary)
            .collect();

        self.output_message(&json!({
            "type": "COLLECTIONS",
            "collections": collections
        }));

        Ok(())
    }

    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
