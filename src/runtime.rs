//! Handoff to the actor runtime.
//!
//! [`WorkerRuntime`] is the single boundary between the bootstrap and the
//! runtime that serves the mesh. A successful call never returns, which the
//! `Infallible` success type records. Any error is a startup failure.
//!
//! [`AcceptLoopRuntime`] is the in-process implementation: it binds the
//! worker address and holds peer connections open. It has no actor semantics.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::address::NetworkAddress;
use crate::config::ListenerConfig;
use crate::net::{ConnectionPermit, ConnectionTracker, Listener, ListenerError};
use crate::trust::TrustPolicy;

/// Pause after a failed accept. Persistent failures (EMFILE, ENFILE) would
/// otherwise spin the loop.
pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// The runtime failed to start serving.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("trust policy {0} is not supported by this runtime")]
    UnsupportedTrustPolicy(String),

    #[error("invalid port {port:?}: {source}")]
    InvalidPort {
        port: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{host} resolved to no addresses")]
    NoAddress { host: String },

    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// An actor runtime's connection-accepting loop.
pub trait WorkerRuntime {
    /// Serve `address` under `trust` for the rest of the process lifetime.
    fn run_forever(
        &self,
        address: &NetworkAddress,
        trust: &TrustPolicy,
    ) -> impl Future<Output = Result<Infallible, RuntimeError>> + Send;
}

/// Binds the worker address and holds inbound peer connections open.
#[derive(Debug, Clone)]
pub struct AcceptLoopRuntime {
    config: ListenerConfig,
    tracker: ConnectionTracker,
}

impl AcceptLoopRuntime {
    pub fn new(config: ListenerConfig) -> Self {
        Self {
            config,
            tracker: ConnectionTracker::new(),
        }
    }

    /// Shared view of the live connection count.
    pub fn tracker(&self) -> ConnectionTracker {
        self.tracker.clone()
    }

    async fn serve(&self, listener: Listener) -> Infallible {
        loop {
            match listener.accept().await {
                Ok((stream, peer, permit)) => {
                    let guard = self.tracker.track();
                    tracing::info!(connection_id = %guard.id(), peer_addr = %peer, "Peer connected");
                    tokio::spawn(async move {
                        hold(stream, permit).await;
                        tracing::info!(connection_id = %guard.id(), peer_addr = %peer, "Peer disconnected");
                    });
                }
                Err(e) => back_off(&e).await,
            }
        }
    }
}

impl WorkerRuntime for AcceptLoopRuntime {
    async fn run_forever(
        &self,
        address: &NetworkAddress,
        trust: &TrustPolicy,
    ) -> Result<Infallible, RuntimeError> {
        if !trust.is_permissive() {
            return Err(RuntimeError::UnsupportedTrustPolicy(trust.kind().to_string()));
        }
        tracing::warn!(trust = %trust, "Accepting all peer connections without certificate validation");

        let bind_addr = resolve(address).await?;
        let listener = Listener::bind(bind_addr, self.config.max_connections).await?;
        Ok(self.serve(listener).await)
    }
}

/// Resolve the address's host through DNS, as peers do.
async fn resolve(address: &NetworkAddress) -> Result<SocketAddr, RuntimeError> {
    let port: u16 = address
        .port()
        .parse()
        .map_err(|source| RuntimeError::InvalidPort {
            port: address.port().to_string(),
            source,
        })?;
    let host = address
        .host()
        .trim_start_matches('[')
        .trim_end_matches(']');

    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .map_err(|source| RuntimeError::Resolve {
            host: host.to_string(),
            source,
        })?;
    let addr = addrs.next().ok_or_else(|| RuntimeError::NoAddress {
        host: host.to_string(),
    })?;

    tracing::debug!(host, resolved = %addr, "Resolved worker address");
    Ok(addr)
}

/// Accept errors are not startup failures: log, wait, retry.
async fn back_off(err: &ListenerError) {
    tracing::warn!(error = %err, backoff_ms = ACCEPT_ERROR_BACKOFF.as_millis() as u64, "Accept failed");
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}

/// Drain a peer connection until it closes.
async fn hold(mut stream: TcpStream, _permit: ConnectionPermit) {
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => tracing::trace!(bytes = n, "Discarded peer bytes"),
            Err(e) => {
                tracing::debug!(error = %e, "Peer read failed");
                break;
            }
        }
    }
}
