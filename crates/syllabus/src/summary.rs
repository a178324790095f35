//! Load diagnostics: issue taxonomy, per-issue records, and the one-load
//! summary returned by [`crate::Catalog::load`].
//!
//! The issue sequence is the sole diagnostic channel out of a load. Every
//! non-fatal defect is recorded and processing continues; only `FileError`
//! aborts a load, and even that is reported through the summary rather than
//! a `Result`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a single load diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// The source could not be opened or read; fatal for that load attempt.
    FileError,
    /// A line was missing its identifier or title; the line was skipped.
    MissingField,
    /// A second-or-later definition of an identifier; discarded.
    Duplicate,
    /// A prerequisite with no matching record; the edge was dropped.
    UnknownPrereq,
    /// A record listed itself as a prerequisite; the edge was dropped.
    SelfPrereq,
    /// One or more records formed a dependency loop; all were excluded.
    Cycle,
    /// Informational: elapsed wall-clock time for the load.
    Timing,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FileError => "FileError",
            Self::MissingField => "MissingField",
            Self::Duplicate => "Duplicate",
            Self::UnknownPrereq => "UnknownPrereq",
            Self::SelfPrereq => "SelfPrereq",
            Self::Cycle => "Cycle",
            Self::Timing => "Timing",
        };
        f.write_str(name)
    }
}

/// One diagnostic produced during a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadIssue {
    /// 1-based source line, or `None` for cross-record diagnostics
    /// (prune/cycle/timing results are not tied to a single line).
    pub line: Option<usize>,
    /// Issue classification.
    pub kind: IssueKind,
    /// Human-readable detail.
    pub detail: String,
}

/// Aggregate account of one load attempt: counters plus the ordered issue
/// sequence. The presentation layer formats these; it must not alter counts
/// or ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Raw lines consumed from the source, blank lines included.
    pub lines_read: usize,
    /// Candidates that parsed cleanly and were admitted (first definition).
    pub parsed: usize,
    /// Records inserted into the final store.
    pub inserted: usize,
    /// Repeat definitions discarded (plus any defensive insert failures).
    pub duplicates: usize,
    /// Prerequisite edges dropped because the target was never defined.
    pub unknown_prereqs: usize,
    /// Prerequisite edges dropped because a record referenced itself.
    pub self_prereqs: usize,
    /// Dependency cycles discovered.
    pub cycles: usize,
    /// Every diagnostic produced, in the order it was discovered.
    pub issues: Vec<LoadIssue>,
}

impl LoadSummary {
    /// Append one diagnostic.
    pub fn push(&mut self, kind: IssueKind, line: Option<usize>, detail: impl Into<String>) {
        self.issues.push(LoadIssue {
            line,
            kind,
            detail: detail.into(),
        });
    }

    /// Iterate the issues of one kind, in discovery order.
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &LoadIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }
}
