//! Per-connection protocol loop.
//!
//! # Lifecycle
//!
//! ```text
//!  Connecting ──room missing──────────────────────────► Closed
//!      │                                                  ▲
//!      │ room found: join + user_count, priming snapshot  │
//!      ▼                                                  │
//!   Active ──peer close / channel error / writer gone─────┘
//!                                                 leave + user_count
//! ```
//!
//! The session never touches the socket. It reads decoded frames from a
//! stream and writes through its [`Connection`], so the whole state machine
//! can be driven from tests with in-memory channels.

use std::fmt;
use std::sync::Arc;

use axum::extract::ws::Message;
use futures::{Stream, StreamExt};

use crate::domain::foundation::{ConnectionId, RoomId};
use crate::domain::room::Room;
use crate::ports::{CodeWrite, RoomStore};

use super::broadcast::Broadcaster;
use super::connection::{Connection, DeliveryFailure, Frame};
use super::messages::{ClientMessage, ParsedFrame, ServerMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Active,
    Closed,
}

/// Why a session reached `Closed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The room did not exist; the session never became active.
    RoomNotFound,
    /// The peer closed the channel, or its writer went away.
    Disconnected,
    /// The inbound side failed.
    ChannelError(String),
    /// The room could not be read while connecting.
    StoreUnavailable(String),
    /// A broadcast gave up on this connection while the peer was still sending.
    Reclaimed,
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEnd::RoomNotFound => write!(f, "room not found"),
            SessionEnd::Disconnected => write!(f, "disconnected"),
            SessionEnd::ChannelError(reason) => write!(f, "channel error: {}", reason),
            SessionEnd::StoreUnavailable(reason) => write!(f, "store unavailable: {}", reason),
            SessionEnd::Reclaimed => write!(f, "reclaimed"),
        }
    }
}

/// Inbound frame, reduced to what the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    Close,
    /// Binary and control frames.
    Ignored,
}

impl From<Message> for InboundFrame {
    fn from(message: Message) -> Self {
        match message {
            Message::Text(text) => InboundFrame::Text(text),
            Message::Close(_) => InboundFrame::Close,
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => InboundFrame::Ignored,
        }
    }
}

/// Drives one connection through `Connecting -> Active -> Closed`.
pub struct RoomSession {
    room_id: RoomId,
    connection: Connection,
    store: Arc<dyn RoomStore>,
    broadcaster: Broadcaster,
    state: SessionState,
}

impl RoomSession {
    pub fn new(
        room_id: RoomId,
        connection: Connection,
        store: Arc<dyn RoomStore>,
        broadcaster: Broadcaster,
    ) -> Self {
        Self {
            room_id,
            connection,
            store,
            broadcaster,
            state: SessionState::Connecting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection.id()
    }

    /// Runs the session to completion.
    ///
    /// Returns once the session is `Closed`; registry cleanup and the
    /// departing `user_count` have already happened by then.
    pub async fn run<S, E>(mut self, mut inbound: S) -> SessionEnd
    where
        S: Stream<Item = Result<InboundFrame, E>> + Unpin,
        E: fmt::Display,
    {
        let room = match self.connect().await {
            Ok(room) => room,
            Err(end) => {
                self.state = SessionState::Closed;
                tracing::info!(
                    room_id = %self.room_id,
                    connection_id = %self.connection.id(),
                    reason = %end,
                    "Session refused"
                );
                return end;
            }
        };

        let end = match self.activate(&room).await {
            Ok(()) => self.receive(&mut inbound).await,
            Err(end) => end,
        };

        self.close(&end).await;
        end
    }

    async fn connect(&self) -> Result<Room, SessionEnd> {
        match self.store.get(&self.room_id).await {
            Ok(Some(room)) => Ok(room),
            Ok(None) => Err(SessionEnd::RoomNotFound),
            Err(e) => Err(SessionEnd::StoreUnavailable(e.to_string())),
        }
    }

    async fn activate(&mut self, room: &Room) -> Result<(), SessionEnd> {
        let count = self
            .broadcaster
            .join(&self.room_id, self.connection.clone())
            .await;
        self.state = SessionState::Active;

        tracing::info!(
            room_id = %self.room_id,
            connection_id = %self.connection.id(),
            members = count,
            "Session opened"
        );

        if !room.has_code() {
            return Ok(());
        }

        let frame: Frame = serde_json::to_string(&ServerMessage::code_update(room.code()))
            .map_err(|e| SessionEnd::ChannelError(e.to_string()))?
            .into();

        self.connection
            .deliver(frame, self.broadcaster.send_timeout())
            .await
            .map_err(|failure| match failure {
                DeliveryFailure::Closed => SessionEnd::Disconnected,
                other => SessionEnd::ChannelError(other.to_string()),
            })
    }

    async fn receive<S, E>(&self, inbound: &mut S) -> SessionEnd
    where
        S: Stream<Item = Result<InboundFrame, E>> + Unpin,
        E: fmt::Display,
    {
        loop {
            let next = tokio::select! {
                next = inbound.next() => next,
                _ = self.connection.closed() => return SessionEnd::Disconnected,
            };

            match next {
                None | Some(Ok(InboundFrame::Close)) => return SessionEnd::Disconnected,
                Some(Err(e)) => return SessionEnd::ChannelError(e.to_string()),
                Some(Ok(InboundFrame::Ignored)) => continue,
                Some(Ok(InboundFrame::Text(text))) => {
                    // a reclaimed connection no longer hears the room, so it
                    // must not write into it either
                    if !self
                        .broadcaster
                        .registry()
                        .contains(&self.connection.id())
                        .await
                    {
                        return SessionEnd::Reclaimed;
                    }
                    self.on_text(&text).await;
                }
            }
        }
    }

    async fn on_text(&self, text: &str) {
        match ClientMessage::parse(text) {
            ParsedFrame::Message(ClientMessage::CodeUpdate { code }) => {
                self.apply_update(code).await
            }
            ParsedFrame::Unrecognized(kind) => {
                tracing::trace!(
                    room_id = %self.room_id,
                    connection_id = %self.connection.id(),
                    kind = %kind,
                    "Ignoring unrecognized message type"
                );
            }
            ParsedFrame::Malformed(reason) => {
                tracing::debug!(
                    room_id = %self.room_id,
                    connection_id = %self.connection.id(),
                    reason = %reason,
                    "Ignoring malformed frame"
                );
            }
        }
    }

    /// Persists the buffer, then fans it out to everyone else.
    ///
    /// The broadcast happens even when the write fails.
    async fn apply_update(&self, code: String) {
        match self.store.update_code(&self.room_id, &code).await {
            Ok(CodeWrite::Saved) => {}
            Ok(CodeWrite::RoomMissing) => {
                tracing::warn!(
                    room_id = %self.room_id,
                    "Room no longer stored, broadcasting unsaved update"
                );
            }
            Err(e) => {
                tracing::warn!(
                    room_id = %self.room_id,
                    error = %e,
                    "Failed to persist code update, broadcasting anyway"
                );
            }
        }

        self.broadcaster
            .broadcast(
                &self.room_id,
                &ServerMessage::code_update(code),
                Some(self.connection.id()),
            )
            .await;
    }

    async fn close(&mut self, end: &SessionEnd) {
        if self.state == SessionState::Closed {
            return;
        }
        let was_active = self.state == SessionState::Active;
        self.state = SessionState::Closed;

        if was_active {
            self.broadcaster
                .registry()
                .leave(&self.room_id, &self.connection.id())
                .await;
            self.broadcaster.broadcast_user_count(&self.room_id).await;
        }

        tracing::info!(
            room_id = %self.room_id,
            connection_id = %self.connection.id(),
            reason = %end,
            "Session closed"
        );
    }
}
