//! Load orchestration: the multi-pass pipeline and the public catalog
//! façade.
//!
//! # Pipeline
//!
//! ```text
//! raw lines
//!     ↓  parse::parse_line()          per-line, line-numbered defects
//! CandidateSet                        duplicate defense on admission
//!     ↓  prune_prerequisites()        self/unknown edges dropped
//! pruned CandidateSet
//!     ↓  cycles::scan()               exclusion set + cycle paths
//! surviving candidates
//!     ↓  CatalogStore::insert()       chained hash table
//! LoadSummary                         counters + ordered issues + timing
//! ```
//!
//! Data flows strictly forward; no pass reaches back into an earlier one.
//! The store is rebuilt from empty on every load — there is no incremental
//! merge.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::candidates::CandidateSet;
use crate::course::Course;
use crate::cycles;
use crate::parse;
use crate::store::CatalogStore;
use crate::summary::{IssueKind, LoadSummary};

/// Validated, queryable in-memory course catalog.
///
/// `load` runs the whole validation pipeline over one source file and
/// returns a [`LoadSummary`]; `search` and `list_sorted` serve queries
/// against whatever the most recent load produced. A built catalog is
/// read-only, so concurrent readers need no extra synchronization as long
/// as no load is running.
#[derive(Debug, Default)]
pub struct Catalog {
    store: CatalogStore,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file, replacing any previously loaded contents.
    ///
    /// Never fails: an unreadable source yields a summary holding a single
    /// `FileError` issue with every counter at zero, and each non-fatal
    /// defect is recorded while processing continues. The returned summary
    /// is a complete account of every record's fate.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> LoadSummary {
        let started = Instant::now();
        let mut summary = LoadSummary::default();

        // Full rebuild: a fresh load discards previous store contents.
        self.store = CatalogStore::new();

        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                summary.push(
                    IssueKind::FileError,
                    None,
                    format!("cannot open file: {}: {err}", path.display()),
                );
                return summary;
            }
        };

        // Pass 1: parse lines, admit candidates, defend against duplicates.
        let mut candidates = CandidateSet::new();
        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            summary.lines_read += 1;

            match parse::parse_line(line) {
                Ok(Some(course)) => candidates.admit(course, line_number, &mut summary),
                Ok(None) => {} // blank line, silently skipped
                Err(defect) => {
                    summary.push(IssueKind::MissingField, Some(line_number), defect.to_string());
                }
            }
        }

        // Pass 2: prune self-references and dangling references.
        candidates.prune_prerequisites(&mut summary);

        // Pass 3: find cycles; members are excluded wholesale.
        let scan = cycles::scan(&candidates);
        for cycle_path in &scan.paths {
            summary.cycles += 1;
            summary.push(
                IssueKind::Cycle,
                None,
                format!("cycle detected: {}", cycle_path.join(" -> ")),
            );
        }

        // Pass 4: insert survivors into the rebuilt store. A survivor may
        // still reference a record the cycle scan excluded; that edge now
        // dangles and must go, or the store would lose referential closure.
        for mut course in candidates.into_courses() {
            if scan.excluded.contains(&course.identifier) {
                continue;
            }
            let identifier = course.identifier.clone();
            course.prerequisites.retain(|prereq| {
                if scan.excluded.contains(prereq) {
                    summary.unknown_prereqs += 1;
                    summary.push(
                        IssueKind::UnknownPrereq,
                        None,
                        format!(
                            "unknown prerequisite '{prereq}' for {identifier}: excluded by cycle"
                        ),
                    );
                    false
                } else {
                    true
                }
            });
            self.insert_validated(course, &mut summary);
        }

        debug!(
            lines = summary.lines_read,
            parsed = summary.parsed,
            inserted = summary.inserted,
            "load complete"
        );

        summary.push(
            IssueKind::Timing,
            None,
            format!("load completed in {} ms", started.elapsed().as_millis()),
        );
        summary
    }

    /// Look up one course by any whitespace/case variant of its identifier.
    #[must_use]
    pub fn search(&self, raw: &str) -> Option<&Course> {
        self.store.search(raw)
    }

    /// All loaded courses, ordered by identifier.
    #[must_use]
    pub fn list_sorted(&self) -> Vec<Course> {
        self.store.enumerate_sorted()
    }

    /// All loaded courses in bucket-then-chain order (unsorted).
    #[must_use]
    pub fn list(&self) -> Vec<Course> {
        self.store.enumerate()
    }

    /// Number of loaded courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// `true` if no courses are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Final insertion gate. Admission already filtered intra-load
    /// duplicates, so an insert failure here should be unreachable; it is
    /// counted rather than asserted, and logged so it cannot pass silently.
    fn insert_validated(&mut self, course: Course, summary: &mut LoadSummary) {
        let identifier = course.identifier.clone();
        if self.store.insert(course) {
            summary.inserted += 1;
        } else {
            warn!(%identifier, "validated record collided in final store");
            summary.duplicates += 1;
        }
    }
}
