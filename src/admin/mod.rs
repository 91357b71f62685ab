//! Portal introspection API, mounted under `/_portal`.
//!
//! `status` is open for health checks; everything else sits behind the
//! administrator guard.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/routes", get(get_routes))
        .route("/resolve", get(get_resolve))
        .route("/database", get(get_database))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
        .route("/status", get(get_status))
}
