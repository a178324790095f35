//! The temporary candidate collection of one load.
//!
//! Candidates are parsed records awaiting validation. The collection is
//! keyed by identifier but iterates in admission order, so diagnostics and
//! the cycle scan are deterministic for a given input file.
//!
//! Two passes live here:
//! - admission (duplicate defense: the first definition of a key wins), and
//! - prerequisite pruning, which runs only after parsing completes so every
//!   identifier in the load is known.

use std::collections::{HashMap, HashSet};

use crate::course::Course;
use crate::summary::{IssueKind, LoadSummary};

/// Insertion-ordered keyed collection of parsed-but-unvalidated courses.
#[derive(Debug, Default)]
pub struct CandidateSet {
    order: Vec<String>,
    map: HashMap<String, Course>,
}

impl CandidateSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of admitted candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` if no candidate has been admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `identifier` is already a candidate key.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.map.contains_key(identifier)
    }

    /// Look up a candidate by its (already normalized) identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Course> {
        self.map.get(identifier)
    }

    /// Iterate candidates in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.order.iter().filter_map(|id| self.map.get(id))
    }

    /// Admit one parsed candidate.
    ///
    /// A repeat definition of an existing key keeps the earlier entry,
    /// bumps the duplicate counter, and records a `Duplicate` issue against
    /// the offending line. A fresh key is inserted and counted as parsed.
    pub fn admit(&mut self, course: Course, line: usize, summary: &mut LoadSummary) {
        if self.map.contains_key(&course.identifier) {
            summary.duplicates += 1;
            summary.push(
                IssueKind::Duplicate,
                Some(line),
                format!("duplicate course: {}", course.identifier),
            );
            return;
        }
        self.order.push(course.identifier.clone());
        self.map.insert(course.identifier.clone(), course);
        summary.parsed += 1;
    }

    /// Prune self-references and dangling references from every candidate's
    /// prerequisite list, preserving the relative order of what survives.
    ///
    /// Runs over the whole collection after parsing so membership checks see
    /// every identifier from the load. Each dropped edge is counted and
    /// recorded; these are cross-record checks, so the issues carry no line
    /// number.
    pub fn prune_prerequisites(&mut self, summary: &mut LoadSummary) {
        let known: HashSet<String> = self.map.keys().cloned().collect();

        for identifier in &self.order {
            let Some(course) = self.map.get_mut(identifier) else {
                continue;
            };

            let mut kept = Vec::with_capacity(course.prerequisites.len());
            for prereq in course.prerequisites.drain(..) {
                if prereq == *identifier {
                    summary.self_prereqs += 1;
                    summary.push(
                        IssueKind::SelfPrereq,
                        None,
                        format!("self prerequisite removed: {identifier}"),
                    );
                } else if !known.contains(&prereq) {
                    summary.unknown_prereqs += 1;
                    summary.push(
                        IssueKind::UnknownPrereq,
                        None,
                        format!("unknown prerequisite '{prereq}' for {identifier}"),
                    );
                } else {
                    kept.push(prereq);
                }
            }
            course.prerequisites = kept;
        }
    }

    /// Consume the set, yielding candidates in admission order.
    #[must_use]
    pub fn into_courses(mut self) -> Vec<Course> {
        self.order
            .iter()
            .filter_map(|id| self.map.remove(id))
            .collect()
    }
}
