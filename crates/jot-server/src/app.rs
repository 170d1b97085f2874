//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware::map_response;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Titles are the rest of the path after the route prefix, so each route has a
/// wildcard form and a bare form for the empty title.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/view/", get(handlers::view::view_root))
        .route("/view/{*title}", get(handlers::view::view_page))
        .route("/edit/", get(handlers::edit::edit_new))
        .route("/edit/{*title}", get(handlers::edit::edit_page))
        .route("/save/", post(handlers::save::save_new))
        .route("/save/{*title}", post(handlers::save::save_page));

    Router::new()
        .route("/", get(|| async { Redirect::to("/edit/") }))
        .merge(page_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(map_response(security::security_headers)),
        )
        .with_state(state)
}
