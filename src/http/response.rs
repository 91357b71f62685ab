//! Response bodies.

use serde::{Deserialize, Serialize};

use crate::routing::{RouteEntry, Segment};

/// What the front end needs to render a resolved route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewResponse {
    pub path: String,
    pub name: String,
    pub view: String,
    pub segment: Segment,
}

impl From<&RouteEntry> for ViewResponse {
    fn from(entry: &RouteEntry) -> Self {
        Self {
            path: entry.path.clone(),
            name: entry.name.clone(),
            view: entry.view.to_string(),
            segment: entry.segment(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
