//! Room command and query handlers.

mod create_room;
mod get_room;

pub use create_room::{CreateRoomCommand, CreateRoomHandler};
pub use get_room::{GetRoomHandler, GetRoomQuery};
