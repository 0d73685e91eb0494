//! Backend dispatch macro for reducing code duplication.
//!
//! Repositories hold one SQL string per backend; this macro keeps the
//! per-backend arms next to each other so they read linearly.

/// Macro for generating backend dispatch match arms over a [`DbConnection`].
///
/// Each arm binds the pooled connection for that backend. Use `&mut **c` to
/// obtain an executor.
///
/// # Example
///
/// ```ignore
/// let user = impl_db_dispatch!(&mut conn, {
///     Postgres(c) => fetch_user(&mut **c, PG_SQL).await?,
///     SQLite(c) => fetch_user(&mut **c, SQLITE_SQL).await?,
/// });
/// ```
///
/// [`DbConnection`]: crate::db::DbConnection
#[macro_export]
macro_rules! impl_db_dispatch {
    ($conn:expr, { $($variant:ident($c:ident) => $body:expr),+ $(,)? }) => {
        match $conn {
            $(
                $crate::db::pool::DbConnection::$variant($c) => $body,
            )+
        }
    };
}

pub use impl_db_dispatch;
