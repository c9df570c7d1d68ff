//! GetSuggestionsHandler - Query handler for cursor-based code suggestions.

use crate::domain::autocomplete;
use crate::domain::room::{Language, RoomError};

/// Query for suggestions at a cursor position.
#[derive(Debug, Clone)]
pub struct GetSuggestionsQuery {
    pub code: String,
    pub cursor_position: usize,
    pub language: String,
}

/// Handler for autocomplete requests.
///
/// Stateless; holds no ports.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetSuggestionsHandler;

impl GetSuggestionsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: GetSuggestionsQuery) -> Result<Vec<String>, RoomError> {
        let language = Language::new(&query.language)?;
        Ok(autocomplete::suggest(
            &query.code,
            query.cursor_position,
            &language,
        ))
    }
}
