//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use jot_storage::PageStore;

use crate::templates::Renderer;

/// Application state shared across all handlers.
///
/// Built once at startup and never mutated; pages are read from the store on
/// every request.
pub(crate) struct AppState {
    /// Page storage backend.
    pub(crate) store: Arc<dyn PageStore>,
    /// Template renderer for pages and error pages.
    pub(crate) renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// Create application state from its collaborators.
    #[must_use]
    pub(crate) fn new(store: Arc<dyn PageStore>, renderer: Arc<dyn Renderer>) -> Self {
        Self { store, renderer }
    }
}
