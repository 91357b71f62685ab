//! Segment classification.
//!
//! # Responsibilities
//! - Decide whether a path belongs to the participant or administrator area
//!
//! # Design Decisions
//! - Pure prefix test on the path, case-sensitive
//! - `/admin` on its own is not under `/admin/` and classifies as participant
//! - Classification only; enforcement belongs to the access guard

use serde::{Deserialize, Serialize};

/// Path prefix that marks the administrator segment.
pub const ADMIN_PREFIX: &str = "/admin/";

/// Logical partition of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Participant,
    Administrator,
}

impl Segment {
    pub fn as_str(self) -> &'static str {
        match self {
            Segment::Participant => "participant",
            Segment::Administrator => "administrator",
        }
    }

    /// Whether paths in this segment need elevated privilege.
    pub fn requires_privilege(self) -> bool {
        matches!(self, Segment::Administrator)
    }
}

/// Classify a path into its segment.
pub fn classify(path: &str) -> Segment {
    if path.starts_with(ADMIN_PREFIX) {
        Segment::Administrator
    } else {
        Segment::Participant
    }
}
