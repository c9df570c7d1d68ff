//! Room fan-out.
//!
//! # Delivery Flow
//!
//! ```text
//! broadcast(room, message, exclude)
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Serialize once    │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Snapshot members  │   registry lock held only here
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Deliver to each   │   concurrent, each bounded by send_timeout
//! │  (minus exclude)   │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  leave() failures  │
//! └────────────────────┘
//! ```
//!
//! A dead connection is only discovered when a broadcast targets it.
//!
//! Member counts are read and queued under a per-room lock, so the last
//! `user_count` a member receives always reflects the room's latest size.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Mutex;

use crate::domain::foundation::{ConnectionId, RoomId};

use super::connection::{Connection, Frame};
use super::messages::ServerMessage;
use super::registry::ConnectionRegistry;

/// Outcome of one fan-out pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the frame was queued for.
    pub delivered: usize,
    /// Connections dropped from the registry after failing delivery.
    pub reclaimed: usize,
}

/// Delivers server messages to the members of a room.
///
/// Cheap to clone; all clones share one [`ConnectionRegistry`].
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
    send_timeout: Duration,
    count_locks: Arc<Mutex<HashMap<RoomId, Arc<Mutex<()>>>>>,
}

impl Broadcaster {
    pub fn new(registry: Arc<ConnectionRegistry>, send_timeout: Duration) -> Self {
        Self {
            registry,
            send_timeout,
            count_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    pub fn send_timeout(&self) -> Duration {
        self.send_timeout
    }

    /// Registers a connection and tells the room its new size.
    ///
    /// Returns the member count after the join.
    pub async fn join(&self, room_id: &RoomId, connection: Connection) -> usize {
        let count = self.registry.join(room_id, connection).await;
        self.broadcast_user_count(room_id).await;
        count
    }

    /// Sends `message` to every member of `room_id` except `exclude`.
    ///
    /// Failures never abort the pass. Each failed connection is removed from
    /// the registry once every send has settled.
    pub async fn broadcast(
        &self,
        room_id: &RoomId,
        message: &ServerMessage,
        exclude: Option<ConnectionId>,
    ) -> BroadcastReport {
        let frame: Frame = match serde_json::to_string(message) {
            Ok(json) => json.into(),
            Err(e) => {
                tracing::error!(room_id = %room_id, error = %e, "Failed to serialize server message");
                return BroadcastReport::default();
            }
        };

        let targets: Vec<Connection> = self
            .registry
            .members(room_id)
            .await
            .into_iter()
            .filter(|conn| Some(conn.id()) != exclude)
            .collect();

        if targets.is_empty() {
            return BroadcastReport::default();
        }

        let timeout = self.send_timeout;
        let outcomes = join_all(targets.iter().map(|conn| {
            let frame = frame.clone();
            async move { (conn.id(), conn.deliver(frame, timeout).await) }
        }))
        .await;

        let mut report = BroadcastReport::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(()) => report.delivered += 1,
                Err(failure) => {
                    tracing::debug!(
                        room_id = %room_id,
                        connection_id = %id,
                        reason = %failure,
                        "Delivery failed, reclaiming connection"
                    );
                    if self.registry.leave(room_id, &id).await {
                        report.reclaimed += 1;
                    }
                }
            }
        }

        report
    }

    /// Broadcasts the room's current member count to the whole room.
    ///
    /// Concurrent calls for one room are serialized, and each reads the count
    /// only once it holds the room's lock. Whichever call queues last has
    /// therefore seen every membership change before it.
    pub async fn broadcast_user_count(&self, room_id: &RoomId) -> BroadcastReport {
        let lock = self.count_lock(room_id).await;
        let report = {
            let _ordered = lock.lock().await;
            let count = self.registry.count(room_id).await;
            self.broadcast(room_id, &ServerMessage::user_count(count), None)
                .await
        };
        self.release_count_lock(room_id, lock).await;
        report
    }

    async fn count_lock(&self, room_id: &RoomId) -> Arc<Mutex<()>> {
        let mut locks = self.count_locks.lock().await;
        locks.entry(room_id.clone()).or_default().clone()
    }

    /// Drops the room's lock entry once no other caller holds a handle to it.
    async fn release_count_lock(&self, room_id: &RoomId, lock: Arc<Mutex<()>>) {
        let mut locks = self.count_locks.lock().await;
        // one reference in the map, one here
        if Arc::strong_count(&lock) == 2 {
            locks.remove(room_id);
        }
    }
}
