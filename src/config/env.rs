//! Environment access and listening port resolution.
//!
//! The operator injects `MONARCH_PORT` into every worker pod. Reads go
//! through [`EnvProvider`] so tests never touch the real process environment.

use std::collections::HashMap;
use std::fmt;

/// Environment variable carrying the mesh port.
pub const PORT_ENV_VAR: &str = "MONARCH_PORT";

/// Port used when the orchestrator does not set one.
pub const DEFAULT_PORT: &str = "26600";

/// Read access to environment variables.
pub trait EnvProvider {
    /// Look up a variable. `None` only when unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
///
/// Values that are not valid unicode are converted lossily, so a mangled
/// port still reaches the runtime and is rejected there.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

/// An in-memory environment.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvProvider for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Listening port as supplied by the environment.
///
/// Not parsed here. A non-numeric value is carried through unchanged and
/// rejected by the runtime when it binds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Port(String);

impl Port {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Port {
    fn default() -> Self {
        Self(DEFAULT_PORT.to_string())
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the mesh port from `MONARCH_PORT`.
///
/// Unset or empty yields [`DEFAULT_PORT`]. Any other value is returned
/// verbatim, including surrounding whitespace.
pub fn resolve_port(env: &impl EnvProvider) -> Port {
    match env.var(PORT_ENV_VAR) {
        Some(value) if !value.is_empty() => Port(value),
        _ => Port::default(),
    }
}
