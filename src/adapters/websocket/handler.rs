//! WebSocket upgrade handler for room connections.
//!
//! Handles the HTTP → WebSocket upgrade and wires the socket to a session:
//! 1. Upgrade to WebSocket
//! 2. Spawn a writer task draining the connection's queue into the socket
//! 3. Run the [`RoomSession`] over the socket's inbound half
//! 4. Once the writer hands the sink back, send a close frame if the
//!    session ended for a reason the client should see

use std::borrow::Cow;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::domain::foundation::RoomId;
use crate::ports::RoomStore;

use super::broadcast::Broadcaster;
use super::connection::{Connection, Frame};
use super::session::{InboundFrame, RoomSession, SessionEnd};

/// Reason sent with the close frame when the room does not exist.
pub const ROOM_NOT_FOUND_REASON: &str = "Room not found";

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct RealtimeState {
    pub store: Arc<dyn RoomStore>,
    pub broadcaster: Broadcaster,
    /// Capacity of each connection's outbound queue.
    pub outbound_buffer: usize,
}

impl RealtimeState {
    pub fn new(store: Arc<dyn RoomStore>, broadcaster: Broadcaster, outbound_buffer: usize) -> Self {
        Self {
            store,
            broadcaster,
            outbound_buffer,
        }
    }
}

/// Handle WebSocket upgrade requests for a room.
///
/// Route: `GET /ws/:room_id`
///
/// Ids that cannot name a room are still upgraded, then closed the same way
/// as an unknown room.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<RealtimeState>,
) -> Response {
    match room_id.parse::<RoomId>() {
        Ok(room_id) => ws.on_upgrade(move |socket| handle_socket(socket, room_id, state)),
        Err(e) => {
            tracing::debug!(room_id = %room_id, error = %e, "Rejecting malformed room id");
            ws.on_upgrade(|mut socket| async move {
                let Some(frame) = close_frame(&SessionEnd::RoomNotFound) else {
                    return;
                };
                if let Err(e) = socket.send(Message::Close(Some(frame))).await {
                    tracing::debug!(error = %e, "Failed to send close frame");
                }
            })
        }
    }
}

/// Handle an established WebSocket connection.
async fn handle_socket(socket: WebSocket, room_id: RoomId, state: RealtimeState) {
    let (sink, stream) = socket.split();
    let (connection, outbound) = Connection::channel(state.outbound_buffer);
    let writer = tokio::spawn(write_frames(sink, outbound));

    let session = RoomSession::new(
        room_id,
        connection,
        state.store.clone(),
        state.broadcaster.clone(),
    );
    let end = session
        .run(stream.map(|result| result.map(InboundFrame::from)))
        .await;

    // The session and the registry have both let go of the connection, so
    // the writer finishes once the queue is drained.
    let Some(frame) = close_frame(&end) else {
        return;
    };
    match writer.await {
        Ok(Some(mut sink)) => {
            if let Err(e) = sink.send(Message::Close(Some(frame))).await {
                tracing::debug!(error = %e, "Failed to send close frame");
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Writer task failed"),
    }
}

/// Drains queued frames into the socket.
///
/// Hands the sink back when the queue closes, or `None` if the socket broke.
async fn write_frames(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<Frame>,
) -> Option<SplitSink<WebSocket, Message>> {
    while let Some(frame) = outbound.recv().await {
        if let Err(e) = sink.send(Message::Text(frame.to_string())).await {
            tracing::debug!(error = %e, "Send error, closing writer");
            return None;
        }
    }
    Some(sink)
}

/// Close frame the client should receive for a given session end.
fn close_frame(end: &SessionEnd) -> Option<CloseFrame<'static>> {
    let (code, reason) = match end {
        SessionEnd::RoomNotFound => (close_code::POLICY, ROOM_NOT_FOUND_REASON),
        SessionEnd::StoreUnavailable(_) => (close_code::ERROR, "Room store unavailable"),
        SessionEnd::Reclaimed => (close_code::AGAIN, "Connection too slow"),
        SessionEnd::Disconnected | SessionEnd::ChannelError(_) => return None,
    };
    Some(CloseFrame {
        code,
        reason: Cow::Borrowed(reason),
    })
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_routes(state: RealtimeState) -> Router {
    Router::new()
        .route("/ws/:room_id", get(ws_handler))
        .with_state(state)
}
