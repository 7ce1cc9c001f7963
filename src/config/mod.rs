//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! orchestrator environment (MONARCH_PORT)
//!     → env.rs (EnvProvider, resolve_port)
//!     → Port (verbatim, defaulted)
//!
//! worker config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WorkerConfig (validated, immutable)
//!     → passed by reference into the bootstrap
//! ```
//!
//! # Design Decisions
//! - Config is built once at process start and never mutated
//! - All fields have defaults so the worker runs with no file at all
//! - The port comes only from the environment, which the operator controls

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{resolve_port, EnvProvider, MapEnv, Port, ProcessEnv, DEFAULT_PORT, PORT_ENV_VAR};
pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, WorkerConfig};
