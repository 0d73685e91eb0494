//! Database access layer.
//!
//! This module provides:
//! - The process-wide connection pool and its connections
//! - Backend dispatch macro shared by the repositories

#[macro_use]
pub mod macros;
pub mod pool;

pub use pool::{DatabaseType, DbConnection, DbPool, PoolConfig};
