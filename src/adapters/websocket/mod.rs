//! WebSocket adapters for realtime room collaboration.
//!
//! Clients attach to a room over a WebSocket, receive the current buffer,
//! and exchange full-buffer updates with every other member of the room.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      ws_handler (per socket)                         │
//! │   reader half ──► RoomSession          writer task ◄── Connection   │
//! └─────────────────────────────────────────────────────────────────────┘
//!                │ persist                        ▲ queued frames
//!                ▼                                │
//! ┌──────────────────────────┐    ┌─────────────────────────────────────┐
//! │        RoomStore         │    │            Broadcaster              │
//! │  InMemory │ Postgres     │    │  serialize once, fan out, reclaim   │
//! └──────────────────────────┘    └─────────────────────────────────────┘
//!                                                 │ snapshot / leave
//!                                                 ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      ConnectionRegistry                              │
//! │   Room: a1b2c3d4       Room: 9f8e7d6c       Room: 0a0b0c0d          │
//! │   ├── conn-a           ├── conn-d           └── conn-g              │
//! │   ├── conn-b           └── conn-e                                    │
//! │   └── conn-c                                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`connection`] - Outbound handle shared by a socket and the registry
//! - [`registry`] - Room membership bookkeeping
//! - [`broadcast`] - Room fan-out with lazy dead-connection reclamation
//! - [`session`] - Per-connection state machine
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod broadcast;
pub mod connection;
pub mod handler;
pub mod messages;
pub mod registry;
pub mod session;

pub use broadcast::{BroadcastReport, Broadcaster};
pub use connection::{Connection, DeliveryFailure, Frame};
pub use handler::{websocket_routes, ws_handler, RealtimeState, ROOM_NOT_FOUND_REASON};
pub use messages::{ClientMessage, ParsedFrame, ServerMessage};
pub use registry::ConnectionRegistry;
pub use session::{InboundFrame, RoomSession, SessionEnd, SessionState};
