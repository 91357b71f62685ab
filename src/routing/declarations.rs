//! Built-in route declarations for the platform front end.
//!
//! Administrator routes mirror the participant routes under `/admin/` and
//! carry an `admin.` name prefix so lookup by name can tell them apart.

use crate::routing::entry::RouteEntry;
use crate::routing::router::{ConfigurationError, RouteTable};

/// Name prefix for administrator routes.
pub const ADMIN_NAME_PREFIX: &str = "admin.";

/// Views present in both segments, as (path suffix, name, view suffix).
const MIRRORED: &[(&str, &str, &str)] = &[
    ("challenges", "Challenges", "Challenges"),
    ("leaderboard", "Leaderboard", "Leaderboard"),
    ("users", "Users", "Users"),
    ("home", "Home", "Home"),
    ("logout", "Logout", "Logout"),
    ("notifications", "Notifications", "Notifications"),
    ("settings", "Settings", "Settings"),
];

/// Route entries in declaration order: participant, administrator, login.
pub fn builtin_entries() -> Vec<RouteEntry> {
    let participant = MIRRORED
        .iter()
        .map(|(path, name, view)| RouteEntry::new(format!("/{path}"), *name, format!("user/{view}")));

    let admin = MIRRORED.iter().map(|(path, name, view)| {
        RouteEntry::new(
            format!("/admin/{path}"),
            format!("{ADMIN_NAME_PREFIX}{name}"),
            format!("admin/{view}"),
        )
    });

    participant
        .chain(admin)
        .chain(std::iter::once(RouteEntry::new("/login", "Login", "Login")))
        .collect()
}

impl RouteTable {
    /// The platform's built-in route table.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::new(builtin_entries())
    }
}
