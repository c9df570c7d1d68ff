//! Room module - the shared buffer a group of clients edits together.

mod aggregate;
mod errors;
mod language;

pub use aggregate::Room;
pub use errors::RoomError;
pub use language::Language;
