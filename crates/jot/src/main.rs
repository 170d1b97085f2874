//! Jot CLI - minimal page editor.
//!
//! Provides commands for:
//! - `serve`: Start the page editing server

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::ServeArgs;
use output::Output;

/// Jot - view, edit and save text pages over HTTP.
#[derive(Parser)]
#[command(name = "jot", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the page editing server.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let Commands::Serve(args) = cli.command;
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.verbose, rust_log.as_deref()))
        .init();

    let result = tokio::runtime::Runtime::new()
        .map_err(error::CliError::from)
        .and_then(|rt| rt.block_on(args.execute()));

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Build the log filter.
///
/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(rust_log.unwrap_or_default())
}
