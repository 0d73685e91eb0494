//! Event endpoints

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use super::error::ApiError;
use super::extractors::ValidId;
use crate::models::{Event, InvalidId, NewEvent};
use crate::state::AppState;

/// GET /events/{id}
pub async fn get_event_by_id(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<Event>, ApiError> {
    let event = state.events.get_event_by_id(&id).await?;
    Ok(Json(event))
}

/// GET /events - lookups need an id
pub async fn missing_event_id() -> ApiError {
    ApiError::from(InvalidId::Empty)
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<NewEvent>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let Json(new_event) = payload?;
    let event = state.events.create_event(new_event).await?;
    tracing::info!(event_id = %event.id, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}
