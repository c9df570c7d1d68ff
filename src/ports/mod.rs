//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RoomStore` - durable room metadata and buffer snapshots

mod room_store;

pub use room_store::{CodeWrite, RoomStore, MAX_CREATE_ATTEMPTS};
