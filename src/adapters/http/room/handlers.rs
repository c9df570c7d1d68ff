//! HTTP handlers for room endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::room::{
    CreateRoomCommand, CreateRoomHandler, GetRoomHandler, GetRoomQuery,
};
use crate::domain::foundation::RoomId;
use crate::domain::room::RoomError;
use crate::ports::RoomStore;

use super::dto::{CreateRoomRequest, CreateRoomResponse, ErrorResponse, RoomResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RoomHandlers {
    create_handler: Arc<CreateRoomHandler>,
    get_handler: Arc<GetRoomHandler>,
}

impl RoomHandlers {
    pub fn new(create_handler: Arc<CreateRoomHandler>, get_handler: Arc<GetRoomHandler>) -> Self {
        Self {
            create_handler,
            get_handler,
        }
    }

    /// Builds both handlers over one store.
    pub fn from_store(store: Arc<dyn RoomStore>) -> Self {
        Self::new(
            Arc::new(CreateRoomHandler::new(store.clone())),
            Arc::new(GetRoomHandler::new(store)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /rooms - Create a new room
pub async fn create_room(
    State(handlers): State<RoomHandlers>,
    body: Option<Json<CreateRoomRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let cmd = CreateRoomCommand {
        language: req.language,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(room) => {
            let response = CreateRoomResponse {
                room_id: room.id().to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_room_error(e),
    }
}

/// GET /rooms/:room_id - Get room details
pub async fn get_room(
    State(handlers): State<RoomHandlers>,
    Path(room_id): Path<String>,
) -> Response {
    let room_id = match room_id.parse::<RoomId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid room ID")),
            )
                .into_response()
        }
    };

    match handlers.get_handler.handle(GetRoomQuery { room_id }).await {
        Ok(room) => {
            let response: RoomResponse = room.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_room_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn handle_room_error(error: RoomError) -> Response {
    match error {
        RoomError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Room", id.as_str())),
        )
            .into_response(),
        RoomError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        RoomError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Room store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Room store unavailable")),
            )
                .into_response()
        }
    }
}
