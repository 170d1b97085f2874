//! `jot serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use jot_config::{CliSettings, Config};
use jot_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover jot.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory where pages are stored (overrides config).
    #[arg(long, env = "JOT_PAGES_DIR")]
    pages_dir: Option<PathBuf>,

    /// Directory of template overrides (overrides config).
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Enable verbose output (request and storage logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// CLI overrides for the loaded configuration.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            pages_dir: self.pages_dir.clone(),
            templates_dir: self.templates_dir.clone(),
        }
    }

    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        tracing::debug!(?config, "Loaded configuration");

        output.highlight(&startup_banner(&config));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config file: {}", path.display()));
        }
        output.info(&format!(
            "Pages directory: {}",
            config.pages_resolved.dir.display()
        ));
        match &config.templates_resolved.dir {
            Some(dir) => output.info(&format!("Templates directory: {}", dir.display())),
            None => output.info("Templates: built-in"),
        }

        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

/// Headline printed before the server starts; binding happens afterwards.
fn startup_banner(config: &Config) -> String {
    format!(
        "Starting jot on http://{}:{}/",
        config.server.host, config.server.port
    )
}
