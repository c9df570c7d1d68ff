//! HTTP adapter for the autocomplete endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{AutocompleteRequest, AutocompleteResponse};
pub use handlers::AutocompleteHandlers;
pub use routes::autocomplete_routes;
