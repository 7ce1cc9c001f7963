//! Top-level worker error and process exit codes.

use thiserror::Error;

use crate::config::ConfigError;
use crate::identity::HostResolutionError;
use crate::observability::logging::LoggingError;
use crate::runtime::RuntimeError;

/// Any fatal bootstrap failure.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("host resolution failed: {0}")]
    HostResolution(#[from] HostResolutionError),

    #[error("runtime failed to start: {0}")]
    RuntimeStartup(#[from] RuntimeError),
}

impl WorkerError {
    /// Process exit status for this failure (sysexits.h values).
    pub fn exit_code(&self) -> u8 {
        match self {
            WorkerError::Config(_) | WorkerError::Logging(_) => 78,
            WorkerError::HostResolution(_) => 68,
            WorkerError::RuntimeStartup(_) => 70,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_non_zero() {
        let errors = [
            WorkerError::HostResolution(HostResolutionError::Empty),
            WorkerError::RuntimeStartup(RuntimeError::NoAddress {
                host: "worker-0".into(),
            }),
            WorkerError::Config(ConfigError::Validation(Vec::new())),
        ];
        let codes: Vec<u8> = errors.iter().map(WorkerError::exit_code).collect();
        assert_eq!(codes, vec![68, 70, 78]);
    }
}
