#![forbid(unsafe_code)]
//! Validated, queryable in-memory course catalog.
//!
//! Ingests a flat-file catalog (`identifier,title[,prereq1,...]` per line)
//! and turns untrusted, possibly malformed, possibly cyclic input into a
//! consistent directed-acyclic prerequisite structure held in a chained
//! hash table.
//!
//! # Pipeline
//!
//! ```text
//! raw lines
//!     ↓  parse::parse_line()
//! candidates (duplicate defense on admission)
//!     ↓  CandidateSet::prune_prerequisites()
//! pruned candidates (no self/dangling edges)
//!     ↓  cycles::scan()
//! cycle-free survivors
//!     ↓  CatalogStore::insert()
//! Catalog + LoadSummary
//! ```
//!
//! After any completed load the store guarantees: unique identifiers, no
//! self-prerequisites, referential closure (every referenced prerequisite is
//! itself stored), and an acyclic prerequisite graph. Records that took part
//! in a cycle are excluded wholesale.
//!
//! # Conventions
//!
//! - **Errors**: nothing escapes [`Catalog::load`]; every outcome lands in
//!   the returned [`LoadSummary`]. Typed defects use `thiserror`.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`) plus `#[instrument]`
//!   on pipeline entry points.

pub mod candidates;
pub mod course;
pub mod cycles;
pub mod load;
pub mod normalize;
pub mod parse;
pub mod store;
pub mod summary;

pub use course::Course;
pub use load::Catalog;
pub use normalize::normalize;
pub use parse::ParseDefect;
pub use store::CatalogStore;
pub use summary::{IssueKind, LoadIssue, LoadSummary};
