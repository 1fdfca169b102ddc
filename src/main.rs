//! Random number service.
//!
//! Serves `GET /random` on the public port and metrics, probes and build
//! info on the admin port. Exits 0 after a clean drain, non-zero on bad
//! configuration, bind failure or drain timeout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use random_service::config::{load_config, ObservabilityConfig};
use random_service::lifecycle::{shutdown_signal, Supervisor};
use random_service::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "random-service")]
#[command(about = "HTTP service returning uniformly distributed integers", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "random-service starting");
    tracing::info!(
        port = config.port,
        admin_port = config.admin_port,
        graceful_shutdown_timeout = %humantime::format_duration(config.graceful_shutdown_timeout),
        seeded = config.random_seed.is_some(),
        "Configuration loaded"
    );

    match Supervisor::new(config).run_until(shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}
