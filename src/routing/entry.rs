//! Route entries and view identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::routing::matcher::{classify, Segment};

/// Identifier of a renderable view.
///
/// Views are owned by the front end; the registry only carries the
/// identifier the shell hands back to it (e.g. `admin/Users`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single binding of a URL path to a named view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Static path literal, must start with `/`.
    pub path: String,

    /// Name used for reverse lookup.
    pub name: String,

    /// View rendered for this path.
    pub view: ViewId,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view: ViewId::new(view),
        }
    }

    /// Segment this entry belongs to, derived from its path.
    pub fn segment(&self) -> Segment {
        classify(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_segment_follows_path() {
        let user = RouteEntry::new("/users", "Users", "user/Users");
        let admin = RouteEntry::new("/admin/users", "admin.Users", "admin/Users");

        assert_eq!(user.segment(), Segment::Participant);
        assert_eq!(admin.segment(), Segment::Administrator);
    }

    #[test]
    fn test_view_id_serializes_as_plain_string() {
        let entry = RouteEntry::new("/home", "Home", "user/Home");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["view"], "user/Home");
    }
}
