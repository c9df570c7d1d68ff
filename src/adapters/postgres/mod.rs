//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresRoomStore` - durable room metadata and buffer snapshots

mod room_store;

pub use room_store::PostgresRoomStore;
