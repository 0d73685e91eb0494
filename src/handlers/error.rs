//! HTTP error responses.
//!
//! The single place where error kinds become status codes. Bodies carry a
//! machine-readable identifier and a message that never includes storage
//! internals; those are logged instead.

use crate::error::DbError;
use crate::models::InvalidId;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("route not found")]
    RouteNotFound,

    #[error(transparent)]
    Db(#[from] DbError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Db(err) => match err {
                DbError::Validation { .. } => StatusCode::BAD_REQUEST,
                DbError::NotFound { .. } => StatusCode::NOT_FOUND,
                DbError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                DbError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "invalid_id",
            Self::InvalidBody(_) => "invalid_body",
            Self::RouteNotFound => "route_not_found",
            Self::Db(err) => err.code(),
        }
    }

    /// Message safe to show to clients.
    fn public_message(&self) -> String {
        match self {
            Self::InvalidId(_) | Self::InvalidBody(_) | Self::RouteNotFound => self.to_string(),
            Self::Db(DbError::NotFound { .. }) => self.to_string(),
            Self::Db(DbError::Validation { .. }) => {
                "the payload violates a storage constraint".to_string()
            }
            Self::Db(DbError::Storage { .. }) => "an internal error occurred".to_string(),
            Self::Db(DbError::Unavailable { .. }) => {
                "the database is temporarily unavailable".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Db(DbError::Storage { message, sql_state }) => {
                error!(error = %message, sql_state = ?sql_state, "Storage error");
            }
            Self::Db(DbError::Unavailable { message }) => {
                warn!(error = %message, "Database unavailable");
            }
            Self::Db(DbError::Validation {
                message,
                constraint,
            }) => {
                warn!(error = %message, constraint = ?constraint, "Constraint violation");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.code(),
            message: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<InvalidId> for ApiError {
    fn from(err: InvalidId) -> Self {
        Self::InvalidId(err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidId(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}
