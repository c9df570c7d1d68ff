//! Command and query handlers.

pub mod autocomplete;
pub mod room;

pub use autocomplete::{GetSuggestionsHandler, GetSuggestionsQuery};
pub use room::{CreateRoomCommand, CreateRoomHandler, GetRoomHandler, GetRoomQuery};
