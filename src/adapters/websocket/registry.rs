//! Connection registry - which live connections belong to which room.
//!
//! # Layout
//!
//! ```text
//! connections (table)                 rooms (index)
//! ┌──────────┬─────────┬────────┐     ┌──────────┬──────────────┐
//! │ conn-a   │ room-1  │ handle │ ◄── │ room-1   │ {a, b}       │
//! │ conn-b   │ room-1  │ handle │     │ room-2   │ {c}          │
//! │ conn-c   │ room-2  │ handle │     └──────────┴──────────────┘
//! └──────────┴─────────┴────────┘
//! ```
//!
//! The room index stores only connection ids; handles live once in the
//! table. Both maps sit behind one lock, so a connection is filed under at
//! most one room and a room entry exists only while its set is non-empty.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use crate::domain::foundation::{ConnectionId, RoomId};

use super::connection::Connection;

struct Member {
    room_id: RoomId,
    connection: Connection,
}

#[derive(Default)]
struct RegistryInner {
    connections: HashMap<ConnectionId, Member>,
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl RegistryInner {
    /// Drops `id` from `room_id`'s set, removing the entry once empty.
    fn unlink(&mut self, room_id: &RoomId, id: &ConnectionId) {
        if let Some(set) = self.rooms.get_mut(room_id) {
            set.remove(id);
            if set.is_empty() {
                self.rooms.remove(room_id);
            }
        }
    }
}

/// In-memory registry of room memberships.
///
/// Constructed once at startup and shared by `Arc` with every session task.
/// Mutations take the write lock; [`members`](Self::members) copies handles
/// out under the read lock so callers iterate a snapshot without holding it.
#[derive(Default)]
pub struct ConnectionRegistry {
    inner: RwLock<RegistryInner>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a room, creating the room entry if absent.
    ///
    /// A connection already filed under another room is moved. Returns the
    /// room's member count after the join.
    pub async fn join(&self, room_id: &RoomId, connection: Connection) -> usize {
        let mut inner = self.inner.write().await;
        let id = connection.id();

        if let Some(previous) = inner.connections.get(&id).map(|m| m.room_id.clone()) {
            if &previous != room_id {
                tracing::debug!(
                    connection_id = %id,
                    from = %previous,
                    to = %room_id,
                    "Connection moved between rooms"
                );
                inner.unlink(&previous, &id);
            }
        }

        inner.connections.insert(
            id,
            Member {
                room_id: room_id.clone(),
                connection,
            },
        );
        let set = inner.rooms.entry(room_id.clone()).or_default();
        set.insert(id);
        set.len()
    }

    /// Removes a connection from a room.
    ///
    /// Returns `false` without touching anything when the connection is not
    /// filed under `room_id`; cleanup may legitimately run twice.
    pub async fn leave(&self, room_id: &RoomId, id: &ConnectionId) -> bool {
        let mut inner = self.inner.write().await;

        match inner.connections.get(id) {
            Some(member) if &member.room_id == room_id => {}
            _ => return false,
        }

        inner.connections.remove(id);
        inner.unlink(room_id, id);
        true
    }

    /// Snapshot of the room's connections, in no particular order.
    pub async fn members(&self, room_id: &RoomId) -> Vec<Connection> {
        let inner = self.inner.read().await;
        inner
            .rooms
            .get(room_id)
            .map(|set| {
                set.iter()
                    .filter_map(|id| inner.connections.get(id))
                    .map(|member| member.connection.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of connections in the room (0 if the room has no entry).
    pub async fn count(&self, room_id: &RoomId) -> usize {
        self.inner
            .read()
            .await
            .rooms
            .get(room_id)
            .map(HashSet::len)
            .unwrap_or(0)
    }

    /// Whether the connection is currently filed under any room.
    pub async fn contains(&self, id: &ConnectionId) -> bool {
        self.inner.read().await.connections.contains_key(id)
    }

    /// Rooms that currently have members. Emptied rooms are never listed.
    pub async fn active_rooms(&self) -> Vec<RoomId> {
        self.inner.read().await.rooms.keys().cloned().collect()
    }

    /// Connections filed under any room.
    pub async fn total_connections(&self) -> usize {
        self.inner.read().await.connections.len()
    }
}
