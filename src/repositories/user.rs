//! User persistence.

use crate::db::DbPool;
use crate::error::{DbError, DbResult};
use crate::impl_db_dispatch;
use crate::models::{NewUser, RecordId, User};
use async_trait::async_trait;
use tracing::debug;

const PG_SELECT_BY_ID: &str = "SELECT id, name, email FROM users WHERE id = $1";
const PG_INSERT: &str =
    "INSERT INTO users (id, name, email) VALUES ($1, $2, $3) RETURNING id, name, email";

const SQLITE_SELECT_BY_ID: &str = "SELECT id, name, email FROM users WHERE id = ?";
const SQLITE_INSERT: &str =
    "INSERT INTO users (id, name, email) VALUES (?, ?, ?) RETURNING id, name, email";

/// Storage operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch one user. `NotFound` when no row matches.
    async fn get_by_id(&self, id: &RecordId) -> DbResult<User>;

    /// Insert a user under a freshly generated id and return the stored row.
    async fn create(&self, new_user: NewUser) -> DbResult<User>;
}

/// [`UserRepository`] backed by the shared pool.
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    pool: DbPool,
}

impl SqlUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn get_by_id(&self, id: &RecordId) -> DbResult<User> {
        let mut conn = self.pool.acquire().await?;
        let user = impl_db_dispatch!(&mut conn, {
            Postgres(c) => sqlx::query_as::<_, User>(PG_SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&mut **c)
                .await?,
            SQLite(c) => sqlx::query_as::<_, User>(SQLITE_SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&mut **c)
                .await?,
        });
        user.ok_or_else(|| DbError::not_found("user", id.as_str()))
    }

    async fn create(&self, new_user: NewUser) -> DbResult<User> {
        let id = RecordId::generate();
        let mut conn = self.pool.acquire().await?;
        let user = impl_db_dispatch!(&mut conn, {
            Postgres(c) => sqlx::query_as::<_, User>(PG_INSERT)
                .bind(id.as_str())
                .bind(&new_user.name)
                .bind(&new_user.email)
                .fetch_one(&mut **c)
                .await?,
            SQLite(c) => sqlx::query_as::<_, User>(SQLITE_INSERT)
                .bind(id.as_str())
                .bind(&new_user.name)
                .bind(&new_user.email)
                .fetch_one(&mut **c)
                .await?,
        });
        debug!(user_id = %user.id, "Inserted user");
        Ok(user)
    }
}
