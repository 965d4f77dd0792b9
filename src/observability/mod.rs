//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware and handlers produce:
//!     → logging.rs (human-readable log lines, tagged with request ID)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
