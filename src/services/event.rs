//! Event orchestration.

use crate::error::DbResult;
use crate::models::{Event, NewEvent, RecordId};
use crate::repositories::EventRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Operations the HTTP layer may perform on events.
#[async_trait]
pub trait EventService: Send + Sync {
    async fn get_event_by_id(&self, id: &RecordId) -> DbResult<Event>;

    async fn create_event(&self, new_event: NewEvent) -> DbResult<Event>;
}

#[derive(Clone)]
pub struct DefaultEventService {
    repo: Arc<dyn EventRepository>,
}

impl DefaultEventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl EventService for DefaultEventService {
    async fn get_event_by_id(&self, id: &RecordId) -> DbResult<Event> {
        self.repo.get_by_id(id).await
    }

    async fn create_event(&self, new_event: NewEvent) -> DbResult<Event> {
        self.repo.create(new_event).await
    }
}
