//! Save endpoint.
//!
//! Validates the submitted page, persists it, and redirects to its view route
//! so reloading the result does not resubmit the form.

use std::sync::Arc;

use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use jot_storage::Page;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::{page_url, respond};
use crate::state::AppState;

/// Submitted edit form. Missing fields are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SaveForm {
    /// Title, used only when the path has none.
    title: String,
    /// Page body.
    body: String,
}

/// Handle POST /save/{title}.
pub(crate) async fn save_page(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Response {
    let result = form
        .map_err(ServerError::from)
        .and_then(|Form(form)| save_impl(&state, &title, form));
    respond(&state, result)
}

/// Handle POST /save/ (title from the form).
pub(crate) async fn save_new(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SaveForm>, FormRejection>,
) -> Response {
    let result = form
        .map_err(ServerError::from)
        .and_then(|Form(form)| save_impl(&state, "", form));
    respond(&state, result)
}

fn save_impl(state: &AppState, path_title: &str, form: SaveForm) -> Result<Response, ServerError> {
    let page = page_from_submission(path_title, form);
    tracing::info!(title = %page.title, "Saving page");

    page.validate()?;
    state.store.save(&page)?;

    let location = page_url("view", &page.title);
    tracing::info!(location = %location, "Redirecting");
    Ok(Redirect::permanent(&location).into_response())
}

/// Build the page to save; the path title wins over the form title.
fn page_from_submission(path_title: &str, form: SaveForm) -> Page {
    let title = if path_title.is_empty() {
        form.title
    } else {
        path_title.to_owned()
    };
    Page::new(title, form.body)
}
