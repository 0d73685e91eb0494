//! find-a-walk server library
//!
//! A REST backend for users and walking events. Requests flow through
//! router → handler → service → repository → connection pool.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod transport;

pub use config::Config;
pub use db::DbPool;
pub use error::{DbError, DbResult};
pub use state::AppState;
