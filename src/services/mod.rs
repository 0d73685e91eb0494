//! Service layer.
//!
//! Sits between the handlers and the repositories. Every operation currently
//! maps 1:1 onto a repository call; cross-resource rules belong here.

pub mod event;
pub mod user;

pub use event::{DefaultEventService, EventService};
pub use user::{DefaultUserService, UserService};
