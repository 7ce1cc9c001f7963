//! Trust policy handed to the runtime for inbound peer connections.
//!
//! The bootstrap owns no certificates or validation logic. It only selects
//! which policy the runtime applies.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Runtime token for [`TrustPolicy::AcceptAll`].
pub const ACCEPT_ALL_TOKEN: &str = "trust_all_connections";

/// How the runtime validates inbound peer connections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum TrustPolicy {
    /// Accept every connection without certificate validation.
    ///
    /// This is a placeholder posture, not a security design.
    #[default]
    AcceptAll,

    /// Verify peers against a CA bundle.
    Certificate { ca_path: PathBuf },

    /// Verify peers against a CA bundle and present our own certificate.
    Mutual {
        ca_path: PathBuf,
        cert_path: PathBuf,
        key_path: PathBuf,
    },
}

impl TrustPolicy {
    /// Short name for logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            TrustPolicy::AcceptAll => "accept_all",
            TrustPolicy::Certificate { .. } => "certificate",
            TrustPolicy::Mutual { .. } => "mutual",
        }
    }

    /// Whether inbound connections are accepted without validation.
    pub fn is_permissive(&self) -> bool {
        matches!(self, TrustPolicy::AcceptAll)
    }
}

impl fmt::Display for TrustPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustPolicy::AcceptAll => f.write_str(ACCEPT_ALL_TOKEN),
            TrustPolicy::Certificate { ca_path } => {
                write!(f, "certificate(ca={})", ca_path.display())
            }
            TrustPolicy::Mutual { ca_path, .. } => {
                write!(f, "mutual(ca={})", ca_path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_accept_all() {
        let policy = TrustPolicy::default();
        assert!(policy.is_permissive());
        assert_eq!(policy.to_string(), "trust_all_connections");
    }

    #[test]
    fn certificate_policies_are_not_permissive() {
        let policy = TrustPolicy::Certificate {
            ca_path: "/etc/monarch/ca.pem".into(),
        };
        assert!(!policy.is_permissive());
        assert_eq!(policy.kind(), "certificate");
        assert_eq!(policy.to_string(), "certificate(ca=/etc/monarch/ca.pem)");
    }
}
