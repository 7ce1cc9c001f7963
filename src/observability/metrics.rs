//! Metrics collection and exposition.
//!
//! # Metrics
//! - `monarch_worker_connections_total` (counter): peer connections accepted
//! - `monarch_worker_active_connections` (gauge): peer connections currently open
//!
//! Recorded in `net::connection`. Without an installed exporter the
//! `metrics` macros are no-ops.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Serve Prometheus metrics on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}
