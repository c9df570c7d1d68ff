//! In-memory adapters for development and tests.

mod room_store;

pub use room_store::{InMemoryRoomStore, RoomIdGenerator};
