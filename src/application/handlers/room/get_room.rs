//! GetRoomHandler - Query handler for reading a room's current state.

use std::sync::Arc;

use crate::domain::foundation::RoomId;
use crate::domain::room::{Room, RoomError};
use crate::ports::RoomStore;

/// Query to get a room by ID.
#[derive(Debug, Clone)]
pub struct GetRoomQuery {
    pub room_id: RoomId,
}

/// Handler for retrieving rooms.
pub struct GetRoomHandler {
    store: Arc<dyn RoomStore>,
}

impl GetRoomHandler {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetRoomQuery) -> Result<Room, RoomError> {
        self.store
            .get(&query.room_id)
            .await?
            .ok_or_else(|| RoomError::not_found(query.room_id))
    }
}
