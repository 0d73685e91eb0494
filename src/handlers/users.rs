//! User endpoints

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use super::error::ApiError;
use super::extractors::ValidId;
use crate::models::{InvalidId, NewUser, User};
use crate::state::AppState;

/// GET /users/{id}
pub async fn get_user_by_id(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> Result<Json<User>, ApiError> {
    let user = state.users.get_user_by_id(&id).await?;
    Ok(Json(user))
}

/// GET /users - lookups need an id
pub async fn missing_user_id() -> ApiError {
    ApiError::from(InvalidId::Empty)
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(new_user) = payload?;
    let user = state.users.create_user(new_user).await?;
    tracing::info!(user_id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}
