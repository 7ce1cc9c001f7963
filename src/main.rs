//! Monarch mesh worker.
//!
//! Runs as one replica of a MonarchMesh StatefulSet. The pod name is the
//! worker's identity, and the headless service resolves that name to the
//! pod, so peers reach this worker at `tcp://<pod-name>:<MONARCH_PORT>`.
//!
//! ```text
//!   MONARCH_PORT ──▶ resolve_port ──┐
//!                                    ├──▶ build_address ──▶ runtime.run_forever (never returns)
//!   gethostname ──▶ resolve_hostname ┘
//! ```

use std::convert::Infallible;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use monarch_worker::config::{load_config, ProcessEnv, WorkerConfig};
use monarch_worker::observability::{init_logging, init_metrics};
use monarch_worker::{AcceptLoopRuntime, Bootstrap, SystemHostname, WorkerError};

#[derive(Parser, Debug)]
#[command(name = "monarch-worker")]
#[command(about = "Monarch actor mesh worker", long_about = None)]
struct Cli {
    /// Worker configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overriding observability.log_level.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(never) => match never {},
        Err(e) => {
            // Logging may not be up yet when config loading fails.
            if matches!(e, WorkerError::Config(_) | WorkerError::Logging(_)) {
                eprintln!("monarch-worker: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<Infallible, WorkerError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WorkerConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        trust = config.trust.kind(),
        max_connections = config.listener.max_connections,
        "Configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        match addr.parse() {
            Ok(addr) => {
                if let Err(e) = init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(metrics_address = %addr, "Failed to parse metrics address"),
        }
    }

    let runtime = AcceptLoopRuntime::new(config.listener.clone());
    let mut bootstrap = Bootstrap::new(&config, ProcessEnv, SystemHostname, runtime);
    bootstrap.run().await
}
