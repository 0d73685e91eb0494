//! Data models for the find-a-walk server.
//!
//! This module re-exports all record and payload types.

pub mod event;
pub mod id;
pub mod user;

// Re-export commonly used types
pub use event::{Event, NewEvent};
pub use id::{InvalidId, MAX_ID_LEN, RecordId};
pub use user::{NewUser, User};
