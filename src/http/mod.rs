//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → middleware/cors.rs (CORS headers, OPTIONS short-circuit)
//!     → middleware/logging.rs (request line)
//!     → middleware/body.rs (JSON / form body parsing)
//!     → middleware/logging.rs (parsed body)
//!     → mock subsystem (compose, deliver)
//!     → response.rs (MockResponse → Response)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
