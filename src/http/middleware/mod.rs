//! Request middleware, applied in this order:
//!
//! 1. `cors`: CORS headers; OPTIONS requests end here with 200
//! 2. `logging::request_span` / `logging::log_request`: one line per request
//! 3. `body::parse_body`: JSON / urlencoded bodies, 400 on malformed input
//! 4. `logging::log_body`: parsed body, when non-empty

pub mod body;
pub mod cors;
pub mod logging;

pub use body::{parse_body, BodyError, ParsedBody};
pub use cors::cors;
pub use logging::{log_body, log_request, request_span};
