//! Transport layer.
//!
//! - `router`: the static routing table and middleware stack
//! - `http`: listener, serve loop and graceful shutdown

pub mod http;
pub mod router;

pub use http::HttpServer;
pub use router::{App, Endpoint, build_router};
