//! CTF portal navigation layer.
//!
//! A route registry for a participant/administrator challenge platform, the
//! HTTP shell that resolves requested paths against it, and a fail-fast MySQL
//! connectivity bootstrap.

pub mod admin;
pub mod bootstrap;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::PortalConfig;
pub use http::PortalServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteEntry, RouteTable, Segment};
