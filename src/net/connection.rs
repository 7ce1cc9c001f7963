//! Live peer accounting.
//!
//! Every accepted peer holds a [`ConnectionGuard`] for as long as its socket
//! is open. The shared count feeds the `monarch_worker_active_connections`
//! gauge and lets tests observe the accept loop from outside.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_PEER: AtomicU64 = AtomicU64::new(1);

/// Process-unique peer label, rendered as `peer-<n>` in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    fn next() -> Self {
        Self(NEXT_PEER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

fn publish_active(active: u64) {
    metrics::gauge!("monarch_worker_active_connections").set(active as f64);
}

/// Shared live-peer count. Clones observe the same count.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    live: Arc<AtomicU64>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accepted peer until the returned guard drops.
    pub fn track(&self) -> ConnectionGuard {
        metrics::counter!("monarch_worker_connections_total").increment(1);
        publish_active(self.live.fetch_add(1, Ordering::SeqCst) + 1);
        ConnectionGuard {
            live: Arc::clone(&self.live),
            id: ConnectionId::next(),
        }
    }

    pub fn active_count(&self) -> u64 {
        self.live.load(Ordering::SeqCst)
    }
}

/// Held for one peer's lifetime.
#[derive(Debug)]
pub struct ConnectionGuard {
    live: Arc<AtomicU64>,
    id: ConnectionId,
}

impl ConnectionGuard {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        publish_active(self.live.fetch_sub(1, Ordering::SeqCst) - 1);
        tracing::trace!(connection_id = %self.id, "Peer released");
    }
}
