//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Bootstrap and runtime produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (connection counters and gauges)
//!
//! Consumers:
//!     → Pod logs (stderr, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::init_metrics;
