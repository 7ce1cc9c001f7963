//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Starting → ResolvingConfig → ResolvingIdentity → BuildingAddress → Running
//!                                        │                                  │
//!                                        └──────────── on error ────────────┴→ Terminated
//! ```
//!
//! # Design Decisions
//! - No signal handling: external termination is the only stop path
//! - No phase is re-entered; there is no restart loop in-process

pub mod startup;

pub use startup::{Bootstrap, Phase};
