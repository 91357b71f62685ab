//! Route lookup.
//!
//! # Responsibilities
//! - Validate and store route entries
//! - Look up an entry by requested path or by name
//! - Return the matched entry or an explicit miss
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in table order; tables are small and order is the contract
//! - Validation collects every issue, not just the first

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::routing::entry::RouteEntry;
use crate::routing::matcher::Segment;

/// A single problem found in a route declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteIssue {
    #[error("route #{index} has an empty path")]
    EmptyPath { index: usize },

    #[error("route '{path}' must begin with '/'")]
    MissingLeadingSlash { path: String },

    #[error("route '{path}' contains whitespace")]
    Whitespace { path: String },

    #[error("route '{path}' has an empty name")]
    EmptyName { path: String },

    #[error("path '{path}' declared twice (routes #{first} and #{second})")]
    DuplicatePath {
        path: String,
        first: usize,
        second: usize,
    },
}

/// Malformed or conflicting route declarations.
///
/// Fatal at startup: a table that fails validation never serves a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    pub issues: Vec<RouteIssue>,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid route table: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigurationError {}

/// Ordered, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Validate `entries` and freeze them into a table.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, ConfigurationError> {
        let issues = validate_entries(&entries);
        if !issues.is_empty() {
            return Err(ConfigurationError { issues });
        }

        let table = Self { entries };
        for name in table.ambiguous_names() {
            tracing::warn!(
                name = %name,
                "Route name declared more than once; lookup by name returns the first entry"
            );
        }
        Ok(table)
    }

    /// Resolve a requested path. Exact, case-sensitive match; first entry wins.
    pub fn resolve_by_path(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Resolve a route name for reverse navigation.
    ///
    /// Names are not required to be unique. When several entries share a
    /// name the first one in table order is returned.
    pub fn resolve_by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Entries belonging to one segment, in declaration order.
    pub fn segment_entries(&self, segment: Segment) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter().filter(move |e| e.segment() == segment)
    }

    /// Names shared by more than one entry, in order of first appearance.
    pub fn ambiguous_names(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.name.as_str()).or_default() += 1;
        }

        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.name.as_str())
            .filter(|name| counts[name] > 1 && seen.insert(*name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entries(entries: &[RouteEntry]) -> Vec<RouteIssue> {
    let mut issues = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.path.is_empty() {
            issues.push(RouteIssue::EmptyPath { index });
            continue;
        }
        if !entry.path.starts_with('/') {
            issues.push(RouteIssue::MissingLeadingSlash {
                path: entry.path.clone(),
            });
        }
        if entry.path.chars().any(char::is_whitespace) {
            issues.push(RouteIssue::Whitespace {
                path: entry.path.clone(),
            });
        }
        if entry.name.trim().is_empty() {
            issues.push(RouteIssue::EmptyName {
                path: entry.path.clone(),
            });
        }
        match first_seen.entry(entry.path.as_str()) {
            Entry::Occupied(first) => issues.push(RouteIssue::DuplicatePath {
                path: entry.path.clone(),
                first: *first.get(),
                second: index,
            }),
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }
    }

    issues
}
