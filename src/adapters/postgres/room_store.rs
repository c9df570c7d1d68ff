//! PostgreSQL implementation of RoomStore.
//!
//! Persists rooms to the `rooms` table (see `migrations/`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode, RoomId, Timestamp};
use crate::domain::room::{Language, Room};
use crate::ports::{CodeWrite, RoomStore, MAX_CREATE_ATTEMPTS};

/// PostgreSQL implementation of RoomStore.
#[derive(Clone)]
pub struct PostgresRoomStore {
    pool: PgPool,
}

impl PostgresRoomStore {
    /// Creates a new PostgresRoomStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from configuration, running migrations if asked.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .connect(&config.url)
            .await
            .map_err(|e| db_error("Failed to connect to database", e))?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to run migrations: {}", e),
                    )
                })?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RoomStore for PostgresRoomStore {
    async fn get(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, code, language, created_at, updated_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch room", e))?;

        row.map(row_to_room).transpose()
    }

    async fn create(&self, language: Language) -> Result<Room, DomainError> {
        for _ in 0..MAX_CREATE_ATTEMPTS {
            let room = Room::new(RoomId::generate(), language.clone());

            let result = sqlx::query(
                r#"
                INSERT INTO rooms (id, code, language, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(room.id().as_str())
            .bind(room.code())
            .bind(room.language().as_str())
            .bind(room.created_at().as_datetime())
            .bind(room.updated_at().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to insert room", e))?;

            if result.rows_affected() == 1 {
                return Ok(room);
            }
            tracing::debug!(room_id = %room.id(), "Room id collision, retrying");
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
        let result = sqlx::query(
            r#"
            UPDATE rooms SET
                code = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(code)
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update room code", e))?;

        if result.rows_affected() == 0 {
            return Ok(CodeWrite::RoomMissing);
        }
        Ok(CodeWrite::Saved)
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn row_to_room(row: sqlx::postgres::PgRow) -> Result<Room, DomainError> {
    let id: String = row.get("id");
    let code: String = row.get("code");
    let language: String = row.get("language");
    let created_at: DateTime<Utc> = row.get("created_at");
    let updated_at: DateTime<Utc> = row.get("updated_at");

    let id: RoomId = id.parse().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Stored room id is invalid: {}", e))
    })?;
    let language = Language::new(language).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored room language is invalid: {}", e),
        )
        .with_detail("room_id", id.to_string())
    })?;

    Ok(Room::reconstitute(
        id,
        code,
        language,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
