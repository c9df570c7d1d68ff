//! HTTP routes for room endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_room, get_room, RoomHandlers};

/// Creates the room router with all endpoints.
pub fn room_routes(handlers: RoomHandlers) -> Router {
    Router::new()
        .route("/rooms", post(create_room))
        .route("/rooms/:room_id", get(get_room))
        .with_state(handlers)
}
