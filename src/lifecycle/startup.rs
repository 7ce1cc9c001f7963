//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the port from the environment
//! - Resolve this worker's host identity
//! - Build the worker address
//! - Hand off to the runtime, which owns the rest of the process lifetime
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no retries
//! - Steps run strictly in order; the handoff only sees a fully built address
//! - Restarts are the orchestrator's job

use std::convert::Infallible;
use std::fmt;

use crate::address::{NetworkAddress, WorkerIdentity};
use crate::config::{resolve_port, EnvProvider, WorkerConfig};
use crate::error::WorkerError;
use crate::identity::{resolve_hostname, HostnameSource};
use crate::runtime::WorkerRuntime;

/// Bootstrap progress. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    ResolvingConfig,
    ResolvingIdentity,
    BuildingAddress,
    Running,
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Starting => "starting",
            Phase::ResolvingConfig => "resolving_config",
            Phase::ResolvingIdentity => "resolving_identity",
            Phase::BuildingAddress => "building_address",
            Phase::Running => "running",
            Phase::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Drives a worker from process start to the runtime handoff.
pub struct Bootstrap<'a, E, H, R> {
    config: &'a WorkerConfig,
    env: E,
    hosts: H,
    runtime: R,
    phase: Phase,
}

impl<'a, E, H, R> Bootstrap<'a, E, H, R>
where
    E: EnvProvider,
    H: HostnameSource,
    R: WorkerRuntime,
{
    pub fn new(config: &'a WorkerConfig, env: E, hosts: H, runtime: R) -> Self {
        Self {
            config,
            env,
            hosts,
            runtime,
            phase: Phase::Starting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = %self.phase, to = %phase, "Bootstrap phase");
        self.phase = phase;
    }

    fn fail(&mut self, err: impl Into<WorkerError>) -> WorkerError {
        let err = err.into();
        tracing::error!(phase = %self.phase, error = %err, "Bootstrap failed");
        self.enter(Phase::Terminated);
        err
    }

    /// Resolve port, identity and address without touching the runtime.
    pub fn prepare(&mut self) -> Result<(WorkerIdentity, NetworkAddress), WorkerError> {
        tracing::info!("--- Starting Monarch Worker ---");

        self.enter(Phase::ResolvingConfig);
        let port = resolve_port(&self.env);

        self.enter(Phase::ResolvingIdentity);
        let hostname = match resolve_hostname(&self.hosts) {
            Ok(hostname) => hostname,
            Err(e) => return Err(self.fail(e)),
        };
        match hostname.stateful_ordinal() {
            Some((workload, ordinal)) => {
                tracing::info!(identity = %hostname, workload, ordinal, "Identity resolved")
            }
            None => tracing::info!(identity = %hostname, "Identity resolved"),
        }

        self.enter(Phase::BuildingAddress);
        let identity = WorkerIdentity::new(hostname, port);
        let address = identity.address();
        tracing::info!(address = %address, "Listening on worker address");

        Ok((identity, address))
    }

    /// Run the bootstrap. Returns only on failure.
    pub async fn run(&mut self) -> Result<Infallible, WorkerError> {
        let (_, address) = self.prepare()?;

        self.enter(Phase::Running);
        let config = self.config;
        let outcome = self.runtime.run_forever(&address, &config.trust).await;
        match outcome {
            Ok(never) => match never {},
            Err(e) => Err(self.fail(e)),
        }
    }
}
