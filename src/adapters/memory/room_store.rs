//! In-memory RoomStore adapter.
//!
//! Default store when no database is configured, and the store used by
//! tests. Rooms live for the lifetime of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, RoomId};
use crate::domain::room::{Language, Room};
use crate::ports::{CodeWrite, RoomStore, MAX_CREATE_ATTEMPTS};

/// Source of candidate room ids.
pub type RoomIdGenerator = Arc<dyn Fn() -> RoomId + Send + Sync>;

/// In-memory storage for rooms.
#[derive(Clone)]
pub struct InMemoryRoomStore {
    rooms: Arc<RwLock<HashMap<RoomId, Room>>>,
    next_id: RoomIdGenerator,
}

impl InMemoryRoomStore {
    /// Create an empty store with random ids.
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(RoomId::generate))
    }

    /// Create an empty store drawing candidate ids from `next_id`.
    pub fn with_id_generator(next_id: RoomIdGenerator) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            next_id,
        }
    }

    /// Get the number of stored rooms
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Default for InMemoryRoomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryRoomStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRoomStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn get(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        Ok(self.rooms.read().await.get(id).cloned())
    }

    async fn create(&self, language: Language) -> Result<Room, DomainError> {
        let mut rooms = self.rooms.write().await;

        for _ in 0..MAX_CREATE_ATTEMPTS {
            let id = (self.next_id)();
            if rooms.contains_key(&id) {
                tracing::debug!(room_id = %id, "Room id collision, retrying");
                continue;
            }
            let room = Room::new(id.clone(), language);
            rooms.insert(id, room.clone());
            return Ok(room);
        }

        Err(DomainError::new(
            ErrorCode::IdExhausted,
            format!(
                "Could not allocate a unique room id after {} attempts",
                MAX_CREATE_ATTEMPTS
            ),
        ))
    }

    async fn update_code(&self, id: &RoomId, code: &str) -> Result<CodeWrite, DomainError> {
        let mut rooms = self.rooms.write().await;
        match rooms.get_mut(id) {
            Some(room) => {
                room.replace_code(code);
                Ok(CodeWrite::Saved)
            }
            None => Ok(CodeWrite::RoomMissing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Mutex;

    /// Generator replaying a fixed script of ids.
    fn scripted(ids: &[&str]) -> RoomIdGenerator {
        let queue: Mutex<Vec<RoomId>> =
            Mutex::new(ids.iter().rev().map(|s| s.parse().unwrap()).collect());
        Arc::new(move || queue.lock().unwrap().pop().expect("script exhausted"))
    }

    #[tokio::test]
    async fn create_starts_with_empty_code() {
        let store = InMemoryRoomStore::new();
        let room = store.create(Language::new("python").unwrap()).await.unwrap();

        assert_eq!(room.code(), "");
        assert_eq!(room.language().as_str(), "python");
        assert_eq!(store.get(room.id()).await.unwrap(), Some(room));
    }

    #[tokio::test]
    async fn create_retries_on_collision() {
        let store =
            InMemoryRoomStore::with_id_generator(scripted(&["aaaa0001", "aaaa0001", "bbbb0002"]));

        let first = store.create(Language::default()).await.unwrap();
        let second = store.create(Language::default()).await.unwrap();

        assert_eq!(first.id().as_str(), "aaaa0001");
        assert_eq!(second.id().as_str(), "bbbb0002");
        assert_eq!(store.room_count().await, 2);
    }

    #[tokio::test]
    async fn create_gives_up_after_max_attempts() {
        let store = InMemoryRoomStore::with_id_generator(Arc::new(|| "samesame".parse::<RoomId>().unwrap()));
        store.create(Language::default()).await.unwrap();

        let err = store.create(Language::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::IdExhausted);
    }

    #[tokio::test]
    async fn update_code_replaces_buffer() {
        let store = InMemoryRoomStore::new();
        let room = store.create(Language::default()).await.unwrap();

        let outcome = store.update_code(room.id(), "print(1)").await.unwrap();

        assert_eq!(outcome, CodeWrite::Saved);
        let stored = store.get(room.id()).await.unwrap().unwrap();
        assert_eq!(stored.code(), "print(1)");
    }

    #[tokio::test]
    async fn update_code_on_missing_room_is_noop() {
        let store = InMemoryRoomStore::new();
        let missing: RoomId = "deadbeef".parse().unwrap();

        let outcome = store.update_code(&missing, "x").await.unwrap();

        assert_eq!(outcome, CodeWrite::RoomMissing);
        assert!(store.get(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_unknown_room_returns_none() {
        let store = InMemoryRoomStore::new();
        assert!(store.get(&"nope1234".parse().unwrap()).await.unwrap().is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn created_ids_are_unique(n in 1usize..200) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let ids = rt.block_on(async {
                let store = InMemoryRoomStore::new();
                let mut ids = Vec::with_capacity(n);
                for _ in 0..n {
                    ids.push(store.create(Language::default()).await.unwrap().id().clone());
                }
                ids
            });
            let unique: std::collections::HashSet<_> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }
    }
}
