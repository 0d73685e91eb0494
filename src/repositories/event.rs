//! Event persistence.

use crate::db::DbPool;
use crate::error::{DbError, DbResult};
use crate::impl_db_dispatch;
use crate::models::{Event, NewEvent, RecordId};
use async_trait::async_trait;
use tracing::debug;

const PG_SELECT_BY_ID: &str = r#"
    SELECT id, title, description, location, starts_at, ends_at
    FROM events
    WHERE id = $1
"#;
const PG_INSERT: &str = r#"
    INSERT INTO events (id, title, description, location, starts_at, ends_at)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, title, description, location, starts_at, ends_at
"#;

const SQLITE_SELECT_BY_ID: &str = r#"
    SELECT id, title, description, location, starts_at, ends_at
    FROM events
    WHERE id = ?
"#;
const SQLITE_INSERT: &str = r#"
    INSERT INTO events (id, title, description, location, starts_at, ends_at)
    VALUES (?, ?, ?, ?, ?, ?)
    RETURNING id, title, description, location, starts_at, ends_at
"#;

/// Storage operations for events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Fetch one event. `NotFound` when no row matches.
    async fn get_by_id(&self, id: &RecordId) -> DbResult<Event>;

    /// Insert an event under a freshly generated id and return the stored row.
    async fn create(&self, new_event: NewEvent) -> DbResult<Event>;
}

/// [`EventRepository`] backed by the shared pool.
#[derive(Debug, Clone)]
pub struct SqlEventRepository {
    pool: DbPool,
}

impl SqlEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqlEventRepository {
    async fn get_by_id(&self, id: &RecordId) -> DbResult<Event> {
        let mut conn = self.pool.acquire().await?;
        let event = impl_db_dispatch!(&mut conn, {
            Postgres(c) => sqlx::query_as::<_, Event>(PG_SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&mut **c)
                .await?,
            SQLite(c) => sqlx::query_as::<_, Event>(SQLITE_SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&mut **c)
                .await?,
        });
        event.ok_or_else(|| DbError::not_found("event", id.as_str()))
    }

    async fn create(&self, new_event: NewEvent) -> DbResult<Event> {
        let id = RecordId::generate();
        let mut conn = self.pool.acquire().await?;
        let event = impl_db_dispatch!(&mut conn, {
            Postgres(c) => sqlx::query_as::<_, Event>(PG_INSERT)
                .bind(id.as_str())
                .bind(&new_event.title)
                .bind(&new_event.description)
                .bind(&new_event.location)
                .bind(new_event.starts_at)
                .bind(new_event.ends_at)
                .fetch_one(&mut **c)
                .await?,
            SQLite(c) => sqlx::query_as::<_, Event>(SQLITE_INSERT)
                .bind(id.as_str())
                .bind(&new_event.title)
                .bind(&new_event.description)
                .bind(&new_event.location)
                .bind(new_event.starts_at)
                .bind(new_event.ends_at)
                .fetch_one(&mut **c)
                .await?,
        });
        debug!(event_id = %event.id, "Inserted event");
        Ok(event)
    }
}
