//! HTTP DTOs for room endpoints.
//!
//! Field names are camelCase on the wire; the browser client reads them as-is.

use serde::{Deserialize, Serialize};

use crate::domain::room::Room;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a room. The body itself is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub language: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for room creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: String,
}

/// Current state of a room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: String,
    pub code: String,
    pub language: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            room_id: room.id().to_string(),
            code: room.code().to_string(),
            language: room.language().to_string(),
            created_at: room.created_at().to_rfc3339(),
            updated_at: room.updated_at().to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::room::Language;

    #[test]
    fn create_room_request_language_is_optional() {
        let req: CreateRoomRequest = serde_json::from_str("{}").unwrap();
        assert!(req.language.is_none());

        let req: CreateRoomRequest = serde_json::from_str(r#"{"language": "java"}"#).unwrap();
        assert_eq!(req.language.as_deref(), Some("java"));
    }

    #[test]
    fn room_response_uses_camel_case() {
        let room = Room::new("abc12345".parse().unwrap(), Language::default());
        let json = serde_json::to_value(RoomResponse::from(room)).unwrap();

        assert_eq!(json["roomId"], "abc12345");
        assert_eq!(json["code"], "");
        assert_eq!(json["language"], "python");
        assert!(json["createdAt"].is_string());
        assert_eq!(json["createdAt"], json["updatedAt"]);
    }

    #[test]
    fn not_found_message_names_the_resource() {
        let err = ErrorResponse::not_found("Room", "abc12345");
        assert_eq!(err.code, "NOT_FOUND");
        assert_eq!(err.message, "Room not found: abc12345");
    }
}
