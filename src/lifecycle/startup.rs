//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics endpoint
//! - Build and check the route table
//! - Run the database bootstrap
//! - Bind the listener and begin serving
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Errors are returned; `main` picks the exit status

use std::io::{self, Write};
use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use tokio::net::TcpListener;

use crate::bootstrap::{confirm, connect, report_failure, ConnectionConfig, ConnectionError, Database};
use crate::config::{AdminConfig, DatabaseConfig, PortalConfig};
use crate::http::PortalServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::metrics;
use crate::routing::{ConfigurationError, RouteTable};

/// Fatal errors raised before the portal starts serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Routes(#[from] ConfigurationError),

    #[error("fallback path '{0}' is not a declared route")]
    UnknownFallback(String),

    #[error(transparent)]
    Database(#[from] ConnectionError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("metrics endpoint: {0}")]
    Metrics(#[from] BuildError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Build the route table and make sure the fallback route exists.
pub fn prepare_route_table(config: &PortalConfig) -> Result<RouteTable, StartupError> {
    let table = config.route_table()?;

    let fallback = &config.navigation.fallback_path;
    if table.resolve_by_path(fallback).is_none() {
        return Err(StartupError::UnknownFallback(fallback.clone()));
    }

    tracing::info!(
        routes = table.len(),
        fallback = %fallback,
        "Route table ready"
    );
    Ok(table)
}

/// Read credentials from the environment and connect, when enabled.
///
/// Returns `Ok(None)` when the bootstrap is disabled in the config.
pub async fn bootstrap_database<O, E>(
    config: &DatabaseConfig,
    out: &mut O,
    err: &mut E,
) -> Result<Option<Database>, StartupError>
where
    O: Write,
    E: Write,
{
    if !config.enabled {
        tracing::info!("Database bootstrap disabled");
        return Ok(None);
    }

    bootstrap_from(ConnectionConfig::from_env(config), out, err)
        .await
        .map(Some)
}

/// Continue the bootstrap from already-resolved settings.
///
/// A settings error counts as a failed attempt.
async fn bootstrap_from<O, E>(
    settings: Result<ConnectionConfig, ConnectionError>,
    out: &mut O,
    err: &mut E,
) -> Result<Database, StartupError>
where
    O: Write,
    E: Write,
{
    match settings {
        Ok(settings) => bootstrap_with(&settings, out, err).await,
        Err(e) => {
            metrics::record_bootstrap(false);
            report_failure(&e, err)?;
            Err(e.into())
        }
    }
}

/// Connect with `settings`, writing the confirmation to `out` or the failure report to `err`.
pub async fn bootstrap_with<O, E>(
    settings: &ConnectionConfig,
    out: &mut O,
    err: &mut E,
) -> Result<Database, StartupError>
where
    O: Write,
    E: Write,
{
    match connect(settings).await {
        Ok(db) => {
            confirm(&db, out)?;
            Ok(db)
        }
        Err(e) => {
            report_failure(&e, err)?;
            Err(e.into())
        }
    }
}

/// Warn when the administrator segment is still gated by the placeholder key.
///
/// Returns `true` when the warning was emitted.
pub fn warn_on_placeholder_key(admin: &AdminConfig) -> bool {
    if !admin.uses_placeholder_key() {
        return false;
    }
    tracing::warn!(
        "Administrator API key is the built-in placeholder; set [admin] api_key before exposing the portal"
    );
    true
}

/// Start every subsystem and serve until a shutdown signal arrives.
pub async fn run(config: PortalConfig) -> Result<(), StartupError> {
    // Counters recorded by later steps need the recorder in place first.
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let table = prepare_route_table(&config)?;
    warn_on_placeholder_key(&config.admin);

    let database =
        bootstrap_database(&config.database, &mut io::stdout(), &mut io::stderr()).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let mut server = PortalServer::new(config, table);
    if let Some(db) = database {
        server = server.with_database(db);
    }
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
