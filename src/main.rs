//! CTF portal server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser navigation                 ┌──────────────────────────────────────────┐
//!   ───────────────────────────────────┼─▶ http shell ──▶ routing::RouteTable      │
//!                                      │       │               │                   │
//!                                      │       │         segment classify          │
//!                                      │       ▼               ▼                   │
//!   View descriptor / redirect ◀───────┼── response ◀── AccessGuard (admin only)   │
//!                                      │                                           │
//!                                      │   startup: config → routes → bootstrap    │
//!                                      │            (MySQL, fail-fast) → listener  │
//!                                      └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ctf_portal::config::load_or_default;
use ctf_portal::lifecycle::{self, StartupError};
use ctf_portal::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "ctf-portal")]
#[command(about = "Navigation shell and route registry for the CTF platform", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        database_enabled = config.database.enabled,
        "ctf-portal starting"
    );

    match lifecycle::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already logged and reported to the operator by the bootstrap.
        Err(StartupError::Database(_)) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
