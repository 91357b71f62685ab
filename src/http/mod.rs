//! HTTP navigation shell.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → RouteTable lookup
//!         found      → middleware/access_control.rs (guard for admin segment)
//!                    → response.rs (view descriptor)
//!         not found  → redirect to fallback route
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::access_control::{AccessDenied, AccessGuard, AllowAll, BearerTokenGuard};
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{ErrorBody, ViewResponse};
pub use server::{AppState, PortalServer};
