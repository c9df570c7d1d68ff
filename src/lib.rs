//! Codepair - Realtime Collaborative Code Rooms
//!
//! Clients join a room over a WebSocket, receive the room's current buffer,
//! and exchange full-buffer updates with every other member. Rooms are
//! created and inspected over a small REST API, which also serves
//! rule-based autocomplete.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
