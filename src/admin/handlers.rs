use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::bootstrap::{RowMap, USER_MESSAGE};
use crate::http::response::{ErrorBody, ViewResponse};
use crate::http::server::AppState;

const DATABASE_INFO_QUERY: &str =
    "SELECT DATABASE() AS name, VERSION() AS version, CURRENT_USER() AS user";

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub routes: usize,
    pub database: DatabaseState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseState {
    Connected,
    Unreachable,
    Disabled,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: Option<String>,
    pub name: Option<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let database = match &state.database {
        None => DatabaseState::Disabled,
        Some(db) => match db.ping().await {
            Ok(()) => DatabaseState::Connected,
            Err(e) => {
                tracing::error!(error = %e, "Database ping failed");
                DatabaseState::Unreachable
            }
        },
    };

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        routes: state.table.len(),
        database,
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<ViewResponse>> {
    Json(state.table.entries().iter().map(ViewResponse::from).collect())
}

pub async fn get_resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    let entry = match (&query.path, &query.name) {
        (Some(path), None) => state.table.resolve_by_path(path),
        (None, Some(name)) => state.table.resolve_by_name(name),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("exactly one of 'path' or 'name' is required")),
            )
                .into_response();
        }
    };

    match entry {
        Some(entry) => Json(ViewResponse::from(entry)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(ErrorBody::new("no matching route"))).into_response(),
    }
}

pub async fn get_database(State(state): State<AppState>) -> Response {
    let Some(db) = &state.database else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody::new("database bootstrap disabled")),
        )
            .into_response();
    };

    match db.fetch_assoc(DATABASE_INFO_QUERY).await {
        Ok(rows) => Json::<Vec<RowMap>>(rows).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Database info query failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(USER_MESSAGE))).into_response()
        }
    }
}
