//! HTTP adapter for room endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateRoomRequest, CreateRoomResponse, ErrorResponse, RoomResponse};
pub(crate) use handlers::handle_room_error;
pub use handlers::RoomHandlers;
pub use routes::room_routes;
