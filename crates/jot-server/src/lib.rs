//! HTTP server for the jot page editor.
//!
//! Serves three page routes over a [`PageStore`](jot_storage::PageStore):
//! - `GET /view/{title}` renders a stored page
//! - `GET /edit/{title}` renders the edit form, prefilled when the page exists
//! - `POST /save/{title}` validates and persists the form, then redirects to the view
//!
//! Failures flow through a single error mapper that picks the status code and
//! error template from an [`ErrorCategory`].
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use jot_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 4000,
//!         pages_dir: PathBuf::from("pages"),
//!         templates_dir: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (security headers, tracing)
//!                        │
//!                        ├─► view / edit / save handlers
//!                        │       │
//!                        │       ├─► PageStore (FsPageStore, one file per title)
//!                        │       └─► Renderer (TemplateRegistry, minijinja)
//!                        │
//!                        └─► map_error ──► error template or plain 500
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod templates;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use jot_storage::{FsPageStore, PageStore};
use state::AppState;

pub use error::{ErrorCategory, ServerError};
pub use templates::{ErrorPayload, PageView, RenderError, Renderer, TemplateData, TemplateRegistry};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding one file per page.
    pub pages_dir: PathBuf,
    /// Directory of template overrides (`None` uses the built-in set).
    pub templates_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4000,
            pages_dir: PathBuf::from("pages"),
            templates_dir: None,
        }
    }
}

/// Run the server.
///
/// Templates are loaded once before binding; a broken template aborts startup
/// instead of failing requests later.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the pages directory cannot be created, a template fails
/// to load, or the server fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.pages_dir)?;
    let store: Arc<dyn PageStore> = Arc::new(FsPageStore::new(config.pages_dir.clone()));

    let registry = TemplateRegistry::load(config.templates_dir.as_deref())?;
    tracing::info!(templates = ?registry.names(), "Loaded templates");

    let state = Arc::new(AppState::new(store, Arc::new(registry)));
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        pages_dir = %config.pages_dir.display(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a loaded jot config.
#[must_use]
pub fn server_config_from_config(config: &jot_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        pages_dir: config.pages_resolved.dir.clone(),
        templates_dir: config.templates_resolved.dir.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use jot_config::CliSettings;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert_eq!(config.pages_dir, PathBuf::from("pages"));
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn test_server_config_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("jot.toml");
        std::fs::write(
            &config_path,
            r#"
[server]
host = "0.0.0.0"
port = 9000

[pages]
dir = "wiki"

[templates]
dir = "theme"
"#,
        )
        .unwrap();

        let config = jot_config::Config::load(Some(&config_path), None).unwrap();
        let server_config = server_config_from_config(&config);

        assert_eq!(server_config.host, "0.0.0.0");
        assert_eq!(server_config.port, 9000);
        assert_eq!(server_config.pages_dir, temp_dir.path().join("wiki"));
        assert_eq!(
            server_config.templates_dir.as_deref(),
            Some(temp_dir.path().join("theme").as_path())
        );
    }

    #[test]
    fn test_server_config_from_cli_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("jot.toml");
        std::fs::write(&config_path, "").unwrap();
        let cli = CliSettings {
            port: Some(4321),
            pages_dir: Some(PathBuf::from("/srv/pages")),
            ..Default::default()
        };

        let config = jot_config::Config::load(Some(&config_path), Some(&cli)).unwrap();
        let server_config = server_config_from_config(&config);

        assert_eq!(server_config.port, 4321);
        assert_eq!(server_config.pages_dir, Path::new("/srv/pages"));
        assert!(server_config.templates_dir.is_none());
    }
}
