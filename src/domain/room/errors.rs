//! Room-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, RoomId, ValidationError};

/// Errors surfaced by room commands and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// Room was not found.
    NotFound(RoomId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl RoomError {
    pub fn not_found(id: RoomId) -> Self {
        RoomError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RoomError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        RoomError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RoomError::NotFound(_) => ErrorCode::RoomNotFound,
            RoomError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RoomError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RoomError::NotFound(id) => format!("Room not found: {}", id),
            RoomError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RoomError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RoomError {}

impl From<DomainError> for RoomError {
    fn from(err: DomainError) -> Self {
        RoomError::Infrastructure(err.to_string())
    }
}

impl From<ValidationError> for RoomError {
    fn from(err: ValidationError) -> Self {
        RoomError::validation(err.field().to_string(), err.to_string())
    }
}
