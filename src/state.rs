//! Application state shared across handlers.

use crate::db::DbPool;
use crate::repositories::{SqlEventRepository, SqlUserRepository};
use crate::services::{DefaultEventService, DefaultUserService, EventService, UserService};
use std::sync::Arc;

/// Services and the pool handle, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub events: Arc<dyn EventService>,
    pub pool: DbPool,
}

impl AppState {
    /// Wire repositories and services on top of an open pool.
    pub fn from_pool(pool: DbPool) -> Self {
        let user_repo = Arc::new(SqlUserRepository::new(pool.clone()));
        let user_service = Arc::new(DefaultUserService::new(user_repo));
        let event_repo = Arc::new(SqlEventRepository::new(pool.clone()));
        let event_service = Arc::new(DefaultEventService::new(event_repo));

        Self {
            users: user_service,
            events: event_service,
            pool,
        }
    }

    /// Assemble state from explicit services, e.g. test doubles.
    pub fn new(users: Arc<dyn UserService>, events: Arc<dyn EventService>, pool: DbPool) -> Self {
        Self {
            users,
            events,
            pool,
        }
    }
}
