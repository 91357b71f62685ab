//! Route registry subsystem.
//!
//! # Data Flow
//! ```text
//! Route declarations (built-in table or [[routes]] in the config file)
//!     → router.rs (validate, freeze as immutable RouteTable)
//!     → shared via Arc with the navigation shell
//!
//! Requested path
//!     → RouteTable::resolve_by_path (exact match, first wins)
//!     → matcher.rs (segment classification for the access guard)
//!     → Return: matched RouteEntry or None
//! ```
//!
//! # Design Decisions
//! - Table built once at startup, immutable at runtime
//! - Static literal paths only, no wildcards or parameters
//! - Duplicate paths are rejected; duplicate names are reported, not rejected
//! - A miss is a normal outcome, the caller decides the fallback

pub mod declarations;
pub mod entry;
pub mod matcher;
pub mod router;

pub use entry::{RouteEntry, ViewId};
pub use matcher::{classify, Segment, ADMIN_PREFIX};
pub use router::{ConfigurationError, RouteIssue, RouteTable};
