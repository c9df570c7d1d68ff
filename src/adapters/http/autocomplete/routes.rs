//! HTTP routes for the autocomplete endpoint.

use axum::{routing::post, Router};

use super::handlers::{get_suggestions, AutocompleteHandlers};

pub fn autocomplete_routes(handlers: AutocompleteHandlers) -> Router {
    Router::new()
        .route("/autocomplete", post(get_suggestions))
        .with_state(handlers)
}
