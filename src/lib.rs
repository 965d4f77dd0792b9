//! Fixture-backed HTTP mock server.
//!
//! Answers any request: `GET` is served from a JSON fixture whose filename is
//! derived from the URL, other methods get canned replies, and the reserved
//! query parameters `_return` / `_delay` force a status or slow a response.

pub mod config;
pub mod fixtures;
pub mod http;
pub mod lifecycle;
pub mod mock;
pub mod observability;

pub use config::MockServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
