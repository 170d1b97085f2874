//! HTTP request handlers.
//!
//! Each route has a thin async handler that extracts the title and delegates to
//! a synchronous `*_impl` function returning `Result<Response, ServerError>`.
//! Failures are handed to [`map_error`] exactly once.

pub(crate) mod edit;
pub(crate) mod save;
pub(crate) mod view;

use axum::response::{Html, IntoResponse, Response};
use jot_storage::Page;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::{ServerError, map_error};
use crate::state::AppState;
use crate::templates::{PageView, TemplateData};

/// Characters escaped when a title is placed in a URL path.
///
/// `/` is kept: routes capture the rest of the path, so `a/b` round-trips.
/// The result contains no HTML-special characters and is inserted into
/// templates unescaped.
const TITLE_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Build the URL of a page route, e.g. `page_url("view", "Home")` is `/view/Home`.
pub(crate) fn page_url(route: &str, title: &str) -> String {
    format!("/{route}/{}", utf8_percent_encode(title, TITLE_PATH))
}

/// Render a page template into an HTML response.
fn render_page(state: &AppState, name: &str, page: &Page) -> Result<Response, ServerError> {
    let body = state
        .renderer
        .render(name, &TemplateData::Page(PageView::from(page)))?;
    Ok(Html(body).into_response())
}

/// Collapse a handler result into a response.
fn respond(state: &AppState, result: Result<Response, ServerError>) -> Response {
    result.unwrap_or_else(|err| map_error(state.renderer.as_ref(), &err))
}
