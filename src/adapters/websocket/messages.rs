//! WebSocket message types for room collaboration.
//!
//! Defines the protocol between server and connected clients:
//! - Server → Client: buffer snapshots/updates, member counts
//! - Client → Server: full-buffer updates
//!
//! Every message is a JSON object tagged by `type`.

use serde::{Deserialize, Serialize};

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full buffer, either the join-time snapshot or a peer's update.
    CodeUpdate { code: String },

    /// Current number of connections in the room.
    UserCount { count: usize },
}

impl ServerMessage {
    pub fn code_update(code: impl Into<String>) -> Self {
        ServerMessage::CodeUpdate { code: code.into() }
    }

    pub fn user_count(count: usize) -> Self {
        ServerMessage::UserCount { count }
    }
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Full buffer replacement. A missing `code` means an empty buffer.
    CodeUpdate {
        #[serde(default)]
        code: String,
    },
}

/// Result of parsing one inbound text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFrame {
    /// A message this server understands.
    Message(ClientMessage),
    /// Well-formed JSON object with a `type` this server does not handle.
    Unrecognized(String),
    /// Not a JSON object with a string `type`, or a known type with bad fields.
    Malformed(String),
}

#[derive(Deserialize)]
struct TypeProbe {
    #[serde(rename = "type")]
    kind: String,
}

const KNOWN_CLIENT_TYPES: &[&str] = &["code_update"];

impl ClientMessage {
    /// Classifies an inbound text frame without failing.
    pub fn parse(text: &str) -> ParsedFrame {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => ParsedFrame::Message(message),
            Err(err) => match serde_json::from_str::<TypeProbe>(text) {
                Ok(probe) if !KNOWN_CLIENT_TYPES.contains(&probe.kind.as_str()) => {
                    ParsedFrame::Unrecognized(probe.kind)
                }
                _ => ParsedFrame::Malformed(err.to_string()),
            },
        }
    }
}
