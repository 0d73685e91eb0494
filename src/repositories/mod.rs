//! Repository layer.
//!
//! Each repository turns a domain operation into exactly one parameterized
//! query against the shared pool. No retries and no caching happen here.

pub mod event;
pub mod user;

pub use event::{EventRepository, SqlEventRepository};
pub use user::{SqlUserRepository, UserRepository};
