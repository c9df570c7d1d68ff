//! CreateRoomHandler - Command handler for opening a new room.

use std::sync::Arc;

use crate::domain::room::{Language, Room, RoomError};
use crate::ports::RoomStore;

/// Command to create a new room.
#[derive(Debug, Clone, Default)]
pub struct CreateRoomCommand {
    /// Language tag; `None` selects the default.
    pub language: Option<String>,
}

/// Handler for creating rooms.
pub struct CreateRoomHandler {
    store: Arc<dyn RoomStore>,
}

impl CreateRoomHandler {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreateRoomCommand) -> Result<Room, RoomError> {
        let language = match cmd.language {
            Some(tag) => Language::new(tag)?,
            None => Language::default(),
        };

        let room = self.store.create(language).await?;

        tracing::info!(
            room_id = %room.id(),
            language = %room.language(),
            "Room created"
        );

        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRoomStore;
    use crate::domain::foundation::{DomainError, ErrorCode, RoomId};
    use crate::ports::CodeWrite;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl RoomStore for FailingStore {
        async fn get(&self, _id: &RoomId) -> Result<Option<Room>, DomainError> {
            Ok(None)
        }

        async fn create(&self, _language: Language) -> Result<Room, DomainError> {
            Err(DomainError::new(ErrorCode::IdExhausted, "no free ids"))
        }

        async fn update_code(&self, _id: &RoomId, _code: &str) -> Result<CodeWrite, DomainError> {
            Ok(CodeWrite::RoomMissing)
        }
    }

    #[tokio::test]
    async fn creates_room_with_default_language() {
        let store = Arc::new(InMemoryRoomStore::new());
        let handler = CreateRoomHandler::new(store.clone());

        let room = handler.handle(CreateRoomCommand::default()).await.unwrap();

        assert_eq!(room.language().as_str(), "python");
        assert_eq!(room.code(), "");
        assert_eq!(store.room_count().await, 1);
    }

    #[tokio::test]
    async fn creates_room_with_requested_language() {
        let handler = CreateRoomHandler::new(Arc::new(InMemoryRoomStore::new()));

        let room = handler
            .handle(CreateRoomCommand {
                language: Some("JavaScript".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(room.language().as_str(), "javascript");
    }

    #[tokio::test]
    async fn rejects_blank_language() {
        let handler = CreateRoomHandler::new(Arc::new(InMemoryRoomStore::new()));

        let result = handler
            .handle(CreateRoomCommand {
                language: Some("   ".to_string()),
            })
            .await;

        assert!(matches!(result, Err(RoomError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure_error() {
        let handler = CreateRoomHandler::new(Arc::new(FailingStore));

        let result = handler.handle(CreateRoomCommand::default()).await;

        assert!(matches!(result, Err(RoomError::Infrastructure(_))));
    }
}
