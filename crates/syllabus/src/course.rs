//! The course record stored in the catalog.

use serde::{Deserialize, Serialize};

/// One validated course record.
///
/// `identifier` is the normalized (whitespace-stripped, uppercased) course
/// code and is the unique key within a catalog. `prerequisites` holds
/// normalized identifiers in source-line order; the order is preserved for
/// display and carries no semantic ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Normalized course code, e.g. `"CSCI200"`.
    pub identifier: String,
    /// Human-readable course title, trimmed but otherwise as written.
    pub title: String,
    /// Normalized prerequisite identifiers in source order.
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Construct a course from already-normalized parts.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        prerequisites: Vec<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            prerequisites,
        }
    }
}
