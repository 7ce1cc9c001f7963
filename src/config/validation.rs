//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (0 < connection limit <= semaphore capacity)
//! - Check certificate paths are present for non-permissive trust policies
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WorkerConfig → Result<(), Vec<ValidationError>>
//! - File existence is not checked here; the runtime owns certificate loading

use std::path::Path;

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::schema::WorkerConfig;
use crate::trust::TrustPolicy;

/// A single semantic problem in a worker config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("listener.max_connections {0} exceeds the limit of {max}", max = Semaphore::MAX_PERMITS)]
    MaxConnectionsTooLarge(usize),

    #[error("trust.{field} must not be empty")]
    EmptyPath { field: &'static str },

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed config.
pub fn validate_config(config: &WorkerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.listener.max_connections {
        0 => errors.push(ValidationError::ZeroMaxConnections),
        n if n > Semaphore::MAX_PERMITS => {
            errors.push(ValidationError::MaxConnectionsTooLarge(n))
        }
        _ => {}
    }

    match &config.trust {
        TrustPolicy::AcceptAll => {}
        TrustPolicy::Certificate { ca_path } => {
            check_path(&mut errors, "ca_path", ca_path);
        }
        TrustPolicy::Mutual {
            ca_path,
            cert_path,
            key_path,
        } => {
            check_path(&mut errors, "ca_path", ca_path);
            check_path(&mut errors, "cert_path", cert_path);
            check_path(&mut errors, "key_path", key_path);
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, path: &Path) {
    if path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyPath { field });
    }
}
