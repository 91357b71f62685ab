use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::response::ErrorBody;
use crate::http::server::AppState;
use crate::routing::Segment;

pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match state.guard.authorize(Segment::Administrator, request.headers()) {
        Ok(()) => next.run(request).await,
        Err(denied) => {
            tracing::warn!(path = %request.uri().path(), reason = %denied, "Portal API access denied");
            (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(denied.to_string()))).into_response()
        }
    }
}
