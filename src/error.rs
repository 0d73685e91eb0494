//! Error types for the find-a-walk server.
//!
//! Repositories originate every [`DbError`]; services forward them unchanged and
//! the HTTP layer is the only place they are turned into status codes.

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// The payload violated a storage-level constraint (unique, check, not-null).
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        /// Name of the violated constraint, when the driver reports one.
        constraint: Option<String>,
    },

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// Transport or query failure against the store.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        /// e.g., "42P01" for undefined table
        sql_state: Option<String>,
    },

    /// Pool exhausted, closed, or the store is unreachable.
    #[error("Database unavailable: {message}")]
    Unavailable { message: String },
}

impl DbError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>, constraint: Option<String>) -> Self {
        Self::Validation {
            message: message.into(),
            constraint,
        }
    }

    /// Create a not found error.
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a storage error with optional SQL state.
    pub fn storage(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Storage {
            message: message.into(),
            sql_state,
        }
    }

    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Machine-readable identifier for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_failed",
            Self::NotFound { .. } => "not_found",
            Self::Storage { .. } => "storage_error",
            Self::Unavailable { .. } => "service_unavailable",
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// Only pool-level failures are `Unavailable` here. Transport failures on a
/// connection already checked out are storage errors; `DbPool::acquire`
/// reclassifies the ones raised while opening a connection.
///
/// `RowNotFound` is classified as storage: repositories use `fetch_optional`
/// and raise `NotFound` themselves, so it only shows up on unexpected paths.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().map(String::from);
                match db_err.kind() {
                    ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation => {
                        DbError::validation(db_err.message(), constraint)
                    }
                    _ => DbError::storage(db_err.message(), db_err.code().map(|c| c.to_string())),
                }
            }
            sqlx::Error::PoolTimedOut => {
                DbError::unavailable("timed out waiting for a pooled connection")
            }
            sqlx::Error::PoolClosed => DbError::unavailable("connection pool is closed"),
            sqlx::Error::Io(io_err) => DbError::storage(format!("I/O error: {}", io_err), None),
            sqlx::Error::Tls(tls_err) => DbError::storage(format!("TLS error: {}", tls_err), None),
            sqlx::Error::Protocol(msg) => DbError::storage(format!("Protocol error: {}", msg), None),
            sqlx::Error::ColumnNotFound(col) => {
                DbError::storage(format!("Column not found: {}", col), None)
            }
            sqlx::Error::ColumnDecode { index, source } => DbError::storage(
                format!("Failed to decode column {}: {}", index, source),
                None,
            ),
            sqlx::Error::Decode(source) => DbError::storage(format!("Decode error: {}", source), None),
            sqlx::Error::WorkerCrashed => DbError::storage("Database worker crashed", None),
            _ => DbError::storage(format!("Unknown database error: {}", err), None),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while validating startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid database URL: {0}")]
    DatabaseUrl(String),

    #[error("Unsupported database scheme '{0}'. Use postgres:// or sqlite:")]
    UnsupportedScheme(String),

    #[error("Invalid pool options: {0}")]
    PoolOptions(String),

    #[error("Invalid API prefix '{0}': must start with '/' and not end with '/'")]
    ApiPrefix(String),

    #[error("Invalid route table: {0}")]
    RouteBinding(String),
}

/// Errors raised by the HTTP server loop.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[source] std::io::Error),
}
