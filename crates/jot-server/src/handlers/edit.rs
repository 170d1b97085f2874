//! Edit endpoint.
//!
//! Renders the edit form. A title with no stored page (or one that fails to
//! load) opens as an empty draft instead of an error.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use jot_storage::Page;

use crate::error::ServerError;
use crate::handlers::{render_page, respond};
use crate::state::AppState;

/// Handle GET /edit/{title}.
pub(crate) async fn edit_page(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Response {
    respond(&state, edit_impl(&state, &title))
}

/// Handle GET /edit/ (new page).
pub(crate) async fn edit_new(State(state): State<Arc<AppState>>) -> Response {
    respond(&state, edit_impl(&state, ""))
}

fn edit_impl(state: &AppState, title: &str) -> Result<Response, ServerError> {
    let page = load_or_draft(state, title);
    render_page(state, "edit", &page)
}

/// Load the page for editing, falling back to an empty draft.
fn load_or_draft(state: &AppState, title: &str) -> Page {
    if title.is_empty() {
        tracing::info!("Editing new page");
        return Page::default();
    }

    tracing::info!(title, "Editing page");
    state.store.load(title).unwrap_or_else(|err| {
        if err.is_not_found() {
            tracing::debug!(title, "Opening empty draft");
        } else {
            tracing::warn!(title, error = %err, "Failed to load page, opening empty draft");
        }
        Page::draft(title)
    })
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
    fn test_load_or_draft_existing() {
        let state = state_with(MockPageStore::new().with_page("Home", "Hello"));

        assert_eq!(load_or_draft(&state, "Home"), Page::new("Home", "Hello"));
    }

    #[test]
    fn test_load_or_draft_missing() {
        let state = state_with(MockPageStore::new());

        assert_eq!(load_or_draft(&state, "NewPage"), Page::draft("NewPage"));
    }

    #[test]
    fn test_load_or_draft_empty_title() {
        let state = state_with(MockPageStore::new().with_page("Home", "Hello"));

        assert_eq!(load_or_draft(&state, ""), Page::default());
    }

    #[test]
    fn test_load_or_draft_tolerates_storage_failure() {
        let state = state_with(
            MockPageStore::new().failing_with(StorageErrorKind::PermissionDenied),
        );

        assert_eq!(load_or_draft(&state, "Home"), Page::draft("Home"));
    }
}
