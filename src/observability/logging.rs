//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber
//! - Pick pretty or JSON output
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level; an invalid value is fatal,
//!   the same as an invalid configured level
//! - Logs go to stderr; stdout is left to the runtime

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Build the level filter from `RUST_LOG`, falling back to `config`.
pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter, LoggingError> {
    let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV)
        .map(|value| value.to_string_lossy().into_owned())
        .filter(|value| !value.is_empty());
    filter_from(from_env, config)
}

fn filter_from(
    from_env: Option<String>,
    config: &ObservabilityConfig,
) -> Result<EnvFilter, LoggingError> {
    let directives = from_env.unwrap_or_else(|| config.log_level.clone());
    EnvFilter::try_new(&directives).map_err(|source| LoggingError::Filter {
        filter: directives,
        source,
    })
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let filter = env_filter(config)?;

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogFormat::Json => (None, Some(fmt::layer().json().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_rejected() {
        let config = ObservabilityConfig {
            log_level: "monarch_worker=loud".to_string(),
            ..ObservabilityConfig::default()
        };
        let err = filter_from(None, &config).unwrap_err();
        assert!(matches!(err, LoggingError::Filter { filter, .. } if filter == "monarch_worker=loud"));
    }

    #[test]
    fn invalid_rust_log_is_rejected() {
        let config = ObservabilityConfig::default();
        let err = filter_from(Some("monarch_worker=loud".to_string()), &config).unwrap_err();
        assert!(matches!(err, LoggingError::Filter { filter, .. } if filter == "monarch_worker=loud"));
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let config = ObservabilityConfig {
            log_level: "monarch_worker=loud".to_string(),
            ..ObservabilityConfig::default()
        };
        assert!(filter_from(Some("debug".to_string()), &config).is_ok());
    }
}
