//! Room aggregate - one shared code buffer.

use crate::domain::foundation::{RoomId, Timestamp};

use super::Language;

/// A named collaborative session holding one shared text buffer.
///
/// `code` is always a complete buffer: every write replaces it wholesale
/// (last write wins), so readers never observe a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    code: String,
    language: Language,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Room {
    /// Creates a fresh room with an empty buffer.
    pub fn new(id: RoomId, language: Language) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            code: String::new(),
            language,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a room from persisted state.
    pub fn reconstitute(
        id: RoomId,
        code: String,
        language: Language,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            code,
            language,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Whether a joining client should be primed with a snapshot.
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }

    /// Replaces the whole buffer.
    pub fn replace_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.updated_at = Timestamp::now();
    }
}
