//! Connection handle shared between a socket and the room registry.
//!
//! A [`Connection`] is the sending half of a bounded queue of text frames.
//! The socket's writer task owns the receiving half and drains it into the
//! WebSocket. When that task ends the queue closes and every later delivery
//! fails with [`DeliveryFailure::Closed`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::SendTimeoutError};

use crate::domain::foundation::ConnectionId;

/// A serialized message, shared by every recipient of one broadcast.
pub type Frame = Arc<str>;

/// Why a frame could not be handed to a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryFailure {
    /// The peer's writer is gone.
    #[error("connection closed")]
    Closed,

    /// The peer's queue stayed full for the whole timeout.
    #[error("send timed out after {0:?}")]
    TimedOut(Duration),
}

/// Handle to one live bidirectional channel.
///
/// Cloning yields another handle to the same channel; equality is by id.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    outbound: mpsc::Sender<Frame>,
}

impl Connection {
    /// Creates a handle and the queue its writer task drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Frame>) {
        let (outbound, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                id: ConnectionId::new(),
                outbound,
            },
            rx,
        )
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues a frame, waiting at most `timeout` for space.
    pub async fn deliver(&self, frame: Frame, timeout: Duration) -> Result<(), DeliveryFailure> {
        self.outbound
            .send_timeout(frame, timeout)
            .await
            .map_err(|err| match err {
                SendTimeoutError::Closed(_) => DeliveryFailure::Closed,
                SendTimeoutError::Timeout(_) => DeliveryFailure::TimedOut(timeout),
            })
    }

    /// Whether the writer side has gone away.
    pub fn is_closed(&self) -> bool {
        self.outbound.is_closed()
    }

    /// Resolves once the writer side has gone away.
    pub async fn closed(&self) {
        self.outbound.closed().await
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}
