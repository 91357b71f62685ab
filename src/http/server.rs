//! HTTP server setup and navigation.
//!
//! # Responsibilities
//! - Create Axum Router with the navigation handler and portal API
//! - Wire up middleware (tracing, timeout, request ID)
//! - Resolve every requested path against the route table
//! - Apply the access guard to administrator routes
//! - Redirect misses to the fallback route

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::bootstrap::Database;
use crate::config::PortalConfig;
use crate::http::middleware::access_control::{AccessGuard, BearerTokenGuard};
use crate::http::request::MakeRequestUuid;
use crate::http::response::{ErrorBody, ViewResponse};
use crate::observability::metrics;
use crate::routing::RouteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub guard: Arc<dyn AccessGuard>,
    pub database: Option<Database>,
    pub fallback_path: Arc<str>,
}

/// HTTP server for the portal front end.
pub struct PortalServer {
    state: AppState,
    config: PortalConfig,
}

impl PortalServer {
    /// Create a server over `table`, guarded by the configured API key.
    pub fn new(config: PortalConfig, table: RouteTable) -> Self {
        let state = AppState {
            table: Arc::new(table),
            guard: Arc::new(BearerTokenGuard::new(config.admin.api_key.clone())),
            database: None,
            fallback_path: Arc::from(config.navigation.fallback_path.as_str()),
        };
        Self { state, config }
    }

    /// Share an open database connection with the handlers.
    pub fn with_database(mut self, database: Database) -> Self {
        self.state.database = Some(database);
        self
    }

    /// Replace the access guard.
    pub fn with_guard(mut self, guard: Arc<dyn AccessGuard>) -> Self {
        self.state.guard = guard;
        self
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn router(&self) -> Router {
        Router::new()
            .nest("/_portal", setup_admin_router(self.state.clone()))
            .fallback(navigate)
            .with_state(self.state.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        self.config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.state.table.len(),
            "HTTP server starting"
        );

        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }
}

/// Resolve the requested path to a view.
async fn navigate(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path();

    let Some(entry) = state.table.resolve_by_path(path) else {
        metrics::record_resolution(None);
        tracing::debug!(path = %path, fallback = %state.fallback_path, "No route matched");
        return Redirect::temporary(&state.fallback_path).into_response();
    };

    let segment = entry.segment();
    metrics::record_resolution(Some(segment));

    if let Err(denied) = state.guard.authorize(segment, &headers) {
        tracing::warn!(path = %path, segment = segment.as_str(), reason = %denied, "Access denied");
        return (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(denied.to_string()))).into_response();
    }

    tracing::debug!(path = %path, name = %entry.name, view = %entry.view, "Route resolved");
    Json(ViewResponse::from(entry)).into_response()
}
