//! Monarch mesh worker bootstrap library.
//!
//! Resolves a worker's stable identity from its orchestrator environment,
//! builds its `tcp://<hostname>:<port>` address, and hands control to the
//! runtime's accept loop.

pub mod address;
pub mod config;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod runtime;
pub mod trust;

pub use address::{build_address, NetworkAddress, Scheme, WorkerIdentity};
pub use config::WorkerConfig;
pub use error::WorkerError;
pub use identity::{resolve_hostname, Hostname, HostnameSource, SystemHostname};
pub use lifecycle::{Bootstrap, Phase};
pub use runtime::{AcceptLoopRuntime, RuntimeError, WorkerRuntime};
pub use trust::TrustPolicy;
