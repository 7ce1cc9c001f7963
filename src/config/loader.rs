//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::WorkerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<WorkerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_config(content: &str) -> Result<WorkerConfig, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use crate::trust::TrustPolicy;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, WorkerConfig::default());
        assert_eq!(config.trust, TrustPolicy::AcceptAll);
    }

    #[test]
    fn full_file_is_parsed() {
        let file = write_config(
            r#"
            [listener]
            max_connections = 64

            [trust]
            policy = "mutual"
            ca_path = "/etc/monarch/ca.pem"
            cert_path = "/etc/monarch/tls.crt"
            key_path = "/etc/monarch/tls.key"

            [observability]
            log_level = "debug"
            log_format = "json"
            metrics_address = "0.0.0.0:9090"
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.max_connections, 64);
        assert_eq!(
            config.trust,
            TrustPolicy::Mutual {
                ca_path: "/etc/monarch/ca.pem".into(),
                cert_path: "/etc/monarch/tls.crt".into(),
                key_path: "/etc/monarch/tls.key".into(),
            }
        );
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(
            config.observability.metrics_address.as_deref(),
            Some("0.0.0.0:9090")
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/monarch-worker.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unknown_policy_is_parse_error() {
        let file = write_config("[trust]\npolicy = \"trust_everyone\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_values_report_every_error() {
        let file = write_config(
            r#"
            [listener]
            max_connections = 0

            [trust]
            policy = "certificate"
            ca_path = ""
            "#,
        );
        match load_config(file.path()).unwrap_err() {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }
}
