//! Mock response subsystem.
//!
//! # Data Flow
//! ```text
//! method + raw URL
//!     → control.rs (_return / _delay from the query string)
//!     → composer.rs (forced status | fixture | 404 | 500 | method default)
//!     → delivery.rs (optional non-blocking delay)
//!     → http/response.rs (MockResponse → axum Response)
//! ```
//!
//! # Design Decisions
//! - Computing the response and timing its delivery are separate steps
//! - A forced status wins over every other rule, for every method
//! - Per-request state only; nothing is shared except the fixture directory

pub mod composer;
pub mod control;
pub mod delivery;

pub use composer::{compose, MockBody, MockResponse, Outcome, FALLBACK_MESSAGE};
pub use control::{extract_delay, extract_return, ControlParams};
pub use delivery::deliver;
