//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Length of a server-generated room id.
pub const GENERATED_ROOM_ID_LEN: usize = 8;

/// Longest room id accepted from a client path.
const MAX_ROOM_ID_LEN: usize = 64;

/// Opaque, short identifier of a collaborative room.
///
/// Generated ids are the first eight hex characters of a v4 UUID. Ids that
/// arrive from clients are validated by [`FromStr`] before any lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Generates a fresh random room id.
    ///
    /// Uniqueness is not guaranteed here; stores retry on collision.
    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(GENERATED_ROOM_ID_LEN);
        Self(id)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ValidationError::empty_field("room_id"));
        }
        if s.len() > MAX_ROOM_ID_LEN {
            return Err(ValidationError::invalid_format(
                "room_id",
                format!("longer than {} characters", MAX_ROOM_ID_LEN),
            ));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "room_id",
                "only ASCII letters, digits, '-' and '_' are allowed",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

/// Identity of one live connection handle.
///
/// Connections carry no identity beyond the handle itself; this id is minted
/// when the handle is created and compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Creates a new random connection id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
