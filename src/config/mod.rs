//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI arguments + optional TOML file
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MockServerConfig (validated, immutable)
//!     → moved into HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so the server runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{FixtureConfig, LimitsConfig, ListenerConfig, MockServerConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
