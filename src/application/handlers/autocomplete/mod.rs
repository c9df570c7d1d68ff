//! Autocomplete query handler.

mod get_suggestions;

pub use get_suggestions::{GetSuggestionsHandler, GetSuggestionsQuery};
