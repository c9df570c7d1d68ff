//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process room store
//! - `postgres` - PostgreSQL room store
//! - `websocket` - Realtime room connections
//! - `http` - REST endpoints and the assembled router

pub mod http;
pub mod memory;
pub mod postgres;
pub mod websocket;

pub use memory::InMemoryRoomStore;
pub use postgres::PostgresRoomStore;
