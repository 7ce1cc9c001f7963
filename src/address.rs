//! Worker address construction.
//!
//! The address is assembled, not validated. A malformed host or port is
//! passed through and surfaces when the runtime binds.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::Port;
use crate::identity::Hostname;

/// Transport scheme of a worker address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    #[default]
    Tcp,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Tcp => "tcp",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for address parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("address {0:?} has no scheme separator")]
    MissingScheme(String),

    #[error("unknown scheme {0:?}")]
    UnknownScheme(String),

    #[error("address {0:?} has no port separator")]
    MissingPort(String),
}

impl FromStr for Scheme {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Scheme::Tcp),
            other => Err(AddressParseError::UnknownScheme(other.to_string())),
        }
    }
}

/// Stable identity of this worker within the mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerIdentity {
    pub hostname: Hostname,
    pub port: Port,
    pub scheme: Scheme,
}

impl WorkerIdentity {
    pub fn new(hostname: Hostname, port: Port) -> Self {
        Self {
            hostname,
            port,
            scheme: Scheme::Tcp,
        }
    }

    pub fn address(&self) -> NetworkAddress {
        build_address(&self.hostname, &self.port, self.scheme)
    }
}

/// Rendered `<scheme>://<host>:<port>` address of a worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkAddress {
    scheme: Scheme,
    host: String,
    port: String,
    rendered: String,
}

impl NetworkAddress {
    /// Split an address back into its parts. The port is taken after the
    /// last `:`, so bracketed IPv6 hosts keep their inner colons.
    pub fn parse(s: &str) -> Result<Self, AddressParseError> {
        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| AddressParseError::MissingScheme(s.to_string()))?;
        let scheme: Scheme = scheme.parse()?;
        let (host, port) = rest
            .rsplit_once(':')
            .ok_or_else(|| AddressParseError::MissingPort(s.to_string()))?;
        Ok(Self {
            scheme,
            host: host.to_string(),
            port: port.to_string(),
            rendered: s.to_string(),
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Build `scheme://hostname:port`.
pub fn build_address(hostname: &Hostname, port: &Port, scheme: Scheme) -> NetworkAddress {
    NetworkAddress {
        scheme,
        host: hostname.as_str().to_string(),
        port: port.as_str().to_string(),
        rendered: format!("{scheme}://{hostname}:{port}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{resolve_hostname, FixedHostname};

    fn host(name: &str) -> Hostname {
        resolve_hostname(&FixedHostname(name.to_string())).unwrap()
    }

    #[test]
    fn builds_tcp_address() {
        let addr = build_address(&host("worker-0"), &Port::default(), Scheme::Tcp);
        assert_eq!(addr.as_str(), "tcp://worker-0:26600");
    }

    #[test]
    fn identity_renders_its_address() {
        let identity = WorkerIdentity::new(host("worker-2"), Port::new("7000"));
        assert_eq!(identity.address().to_string(), "tcp://worker-2:7000");
    }

    #[test]
    fn malformed_parts_pass_through() {
        let addr = build_address(&host("a b"), &Port::new("x:y"), Scheme::Tcp);
        assert_eq!(addr.as_str(), "tcp://a b:x:y");
    }

    #[test]
    fn parse_recovers_parts() {
        for (name, port) in [
            ("worker-0", "26600"),
            ("mesh-3.mesh-svc.default.svc.cluster.local", "7000"),
            ("10.0.0.4", "1"),
            ("[::1]", "26600"),
        ] {
            let built = build_address(&host(name), &Port::new(port), Scheme::Tcp);
            let parsed = NetworkAddress::parse(built.as_str()).unwrap();
            assert_eq!(parsed.scheme(), Scheme::Tcp);
            assert_eq!(parsed.host(), name);
            assert_eq!(parsed.port(), port);
            assert_eq!(parsed, built);
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            NetworkAddress::parse("worker-0:26600"),
            Err(AddressParseError::MissingScheme("worker-0:26600".into()))
        );
        assert_eq!(
            NetworkAddress::parse("udp://worker-0:26600"),
            Err(AddressParseError::UnknownScheme("udp".into()))
        );
        assert_eq!(
            NetworkAddress::parse("tcp://worker-0"),
            Err(AddressParseError::MissingPort("tcp://worker-0".into()))
        );
    }
}
