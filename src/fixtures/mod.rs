//! Fixture resolution subsystem.
//!
//! # Data Flow
//! ```text
//! raw request URL ("/users/1?active=true")
//!     → naming.rs (deterministic filename: "users_1--active=true.json")
//!     → store.rs (read + parse <dir>/<filename>)
//!     → serde_json::Value | FixtureError
//! ```
//!
//! # Design Decisions
//! - Every lookup reads the file again; edits on disk apply to the next request
//! - No schema enforcement: the document is returned exactly as parsed
//! - The full query string is part of the key, control parameters included

pub mod naming;
pub mod store;

pub use naming::{derive_filename, filename_for_url};
pub use store::{FixtureError, FixtureStore};
