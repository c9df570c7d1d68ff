//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure; [`router`]
//! merges them with the WebSocket endpoint into one application.

pub mod autocomplete;
pub mod room;
pub mod root;
pub mod router;

pub use autocomplete::{autocomplete_routes, AutocompleteHandlers};
pub use room::{room_routes, ErrorResponse, RoomHandlers};
pub use root::root_routes;
pub use router::{app_router, RouterConfig};
