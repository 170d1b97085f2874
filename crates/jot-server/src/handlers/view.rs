//! View endpoint.
//!
//! Renders a stored page, or the not-found page when the title has none.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;

use crate::error::ServerError;
use crate::handlers::{render_page, respond};
use crate::state::AppState;

/// Handle GET /view/{title}.
pub(crate) async fn view_page(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Response {
    respond(&state, view_impl(&state, &title))
}

/// Handle GET /view/ (no title).
pub(crate) async fn view_root(State(state): State<Arc<AppState>>) -> Response {
    respond(&state, view_impl(&state, ""))
}

fn view_impl(state: &AppState, title: &str) -> Result<Response, ServerError> {
    tracing::info!(title, "Viewing page");
    let page = state
        .store
        .load(title)
        .map_err(|e| ServerError::from_load(title, e))?;
    render_page(state, "view", &page)
}

#[cfg(test)]
mod tests {
    use jot_storage::{MockPageStore, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::templates::TemplateRegistry;

    fn state_with(store: MockPageStore) -> AppState {
        AppState::new(
            Arc::new(store),
            Arc::new(TemplateRegistry::builtin().unwrap()),
        )
    }

    #[test]
    fn test_view_impl_renders_page() {
        let state = state_with(MockPageStore::new().with_page("Home", "Hello"));

        let response = view_impl(&state, "Home").unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }

    #[test]
    fn test_view_impl_missing_page() {
        let state = state_with(MockPageStore::new());

        let err = view_impl(&state, "Missing").unwrap_err();

        assert!(matches!(err, ServerError::PageNotFound { .. }));
    }

    #[test]
    fn test_view_impl_empty_title_is_not_found() {
        let state = state_with(MockPageStore::new());

        let err = view_impl(&state, "").unwrap_err();

        assert!(matches!(err, ServerError::PageNotFound { .. }));
    }

    #[test]
    fn test_view_impl_storage_failure() {
        let state = state_with(
            MockPageStore::new()
                .with_page("Home", "Hello")
                .failing_with(StorageErrorKind::PermissionDenied),
        );

        let err = view_impl(&state, "Home").unwrap_err();

        assert!(matches!(err, ServerError::Storage(_)));
    }
}
