//! User orchestration.

use crate::error::DbResult;
use crate::models::{NewUser, RecordId, User};
use crate::repositories::UserRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the HTTP layer may perform on users.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user_by_id(&self, id: &RecordId) -> DbResult<User>;

    async fn create_user(&self, new_user: NewUser) -> DbResult<User>;
}

/// Forwards each call to the repository and returns its result untouched.
#[derive(Clone)]
pub struct DefaultUserService {
    repo: Arc<dyn UserRepository>,
}

impl DefaultUserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for DefaultUserService {
    async fn get_user_by_id(&self, id: &RecordId) -> DbResult<User> {
        self.repo.get_by_id(id).await
    }

    async fn create_user(&self, new_user: NewUser) -> DbResult<User> {
        self.repo.create(new_user).await
    }
}
