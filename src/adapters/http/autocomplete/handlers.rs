//! HTTP handlers for the autocomplete endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::room::handle_room_error;
use crate::application::handlers::autocomplete::{GetSuggestionsHandler, GetSuggestionsQuery};

use super::dto::{AutocompleteRequest, AutocompleteResponse};

#[derive(Clone, Default)]
pub struct AutocompleteHandlers {
    suggestions_handler: Arc<GetSuggestionsHandler>,
}

impl AutocompleteHandlers {
    pub fn new(suggestions_handler: Arc<GetSuggestionsHandler>) -> Self {
        Self {
            suggestions_handler,
        }
    }
}

/// POST /autocomplete - Suggestions for the line under the cursor
pub async fn get_suggestions(
    State(handlers): State<AutocompleteHandlers>,
    Json(req): Json<AutocompleteRequest>,
) -> Response {
    let query = GetSuggestionsQuery {
        code: req.code,
        cursor_position: req.cursor_position,
        language: req.language,
    };

    match handlers.suggestions_handler.handle(query) {
        Ok(suggestions) => {
            (StatusCode::OK, Json(AutocompleteResponse { suggestions })).into_response()
        }
        Err(e) => handle_room_error(e),
    }
}
