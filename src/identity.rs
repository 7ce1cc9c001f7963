//! Host identity resolution.
//!
//! In a StatefulSet the host name is the pod name (`<workload>-<ordinal>`),
//! and the headless service publishes a DNS record under that same name.
//! The worker's identity and its reachable address must therefore come from
//! one source: the OS host name. There is no fallback.

use std::ffi::OsString;
use std::fmt;

use thiserror::Error;

/// The host name could not be determined.
#[derive(Debug, Error)]
pub enum HostResolutionError {
    #[error("operating system did not report a host name: {0}")]
    Os(#[from] nix::errno::Errno),

    #[error("host name {0:?} is not valid UTF-8")]
    NotUnicode(OsString),

    #[error("host name is empty")]
    Empty,
}

/// Source of this process's host name.
pub trait HostnameSource {
    fn hostname(&self) -> Result<String, HostResolutionError>;
}

/// Reads the host name with `gethostname(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostname;

impl HostnameSource for SystemHostname {
    fn hostname(&self) -> Result<String, HostResolutionError> {
        nix::unistd::gethostname()?
            .into_string()
            .map_err(HostResolutionError::NotUnicode)
    }
}

/// A preset host name, for embedding and tests.
#[derive(Debug, Clone)]
pub struct FixedHostname(pub String);

impl HostnameSource for FixedHostname {
    fn hostname(&self) -> Result<String, HostResolutionError> {
        Ok(self.0.clone())
    }
}

/// This worker's host name. Opaque; never reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hostname(String);

impl Hostname {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a StatefulSet pod name into `(workload, ordinal)`.
    ///
    /// Informational only. Returns `None` for names without a numeric suffix.
    pub fn stateful_ordinal(&self) -> Option<(&str, u32)> {
        let (workload, ordinal) = self.0.rsplit_once('-')?;
        if workload.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some((workload, ordinal.parse().ok()?))
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the host name. Empty names are rejected.
pub fn resolve_hostname(source: &impl HostnameSource) -> Result<Hostname, HostResolutionError> {
    let name = source.hostname()?;
    if name.is_empty() {
        return Err(HostResolutionError::Empty);
    }
    Ok(Hostname(name))
}
