//! Room store port - durable `roomId -> room` mapping.
//!
//! The realtime core reads a room once when a connection arrives and writes
//! the full buffer on every inbound update. Writes are whole-buffer
//! replacements, so implementations never expose a torn value.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::room::{Language, Room};

/// Maximum id generation attempts before `create` gives up.
pub const MAX_CREATE_ATTEMPTS: usize = 16;

/// Outcome of a buffer write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeWrite {
    /// Buffer replaced.
    Saved,
    /// No room with that id; nothing was written.
    RoomMissing,
}

/// Repository port for room persistence.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Find a room by id. Returns `None` if not found.
    async fn get(&self, id: &RoomId) -> Result<Option<Room>, DomainError>;

    /// Create a room with an empty buffer.
    ///
    /// Generates a short id and retries on collision with an existing room.
    ///
    /// # Errors
    ///
    /// - `IdExhausted` after [`MAX_CREATE_ATTEMPTS`] collisions
    /// - `DatabaseError` on persistence failure
    async fn create(&self, language: Language) -> Result<Room, DomainError>;

    /// Replace a room's buffer.
    ///
    /// Absent rooms are a no-op reported as [`CodeWrite::RoomMissing`].
    async fn update_code(&self, id: &RoomId, code: &str) -> Result<CodeWrite, DomainError>;
}
