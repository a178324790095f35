//! The final catalog store: a chained hash table keyed by identifier.
//!
//! Buckets are an arena of owned vectors (`Vec<Vec<Course>>`), so a chain is
//! just a growable sequence scanned linearly — no node/pointer management.
//! The bucket count is a fixed prime chosen at construction; there is no
//! dynamic resizing. With course-catalog-sized inputs (tens to low hundreds
//! of records) the load factor stays low and insert/search average O(1).
//!
//! Only validated, acyclic records reach this store; the load orchestrator
//! rebuilds it from empty on every load.

use crate::course::Course;
use crate::normalize::normalize;

/// Default bucket count. Prime, so the 31-based rolling hash spreads
/// course-code-like keys evenly.
pub const DEFAULT_BUCKET_COUNT: usize = 179;

/// Below this many records, `enumerate_sorted` uses an in-place insertion
/// sort; at or above it, the standard comparison sort. Same output either
/// way.
const INSERTION_SORT_MAX: usize = 50;

/// Chained hash table of validated course records.
#[derive(Debug)]
pub struct CatalogStore {
    buckets: Vec<Vec<Course>>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Create an empty store with [`DEFAULT_BUCKET_COUNT`] buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Create an empty store with a custom bucket count (clamped to at
    /// least one bucket). Useful for forcing collisions in tests.
    #[must_use]
    pub fn with_buckets(count: usize) -> Self {
        let count = count.max(1);
        Self {
            buckets: vec![Vec::new(); count],
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Insert a record, keyed by its identifier.
    ///
    /// Returns `false` (and stores nothing) if the key already exists in
    /// its bucket's chain; `true` on success.
    pub fn insert(&mut self, course: Course) -> bool {
        let bucket = self.bucket_of(&course.identifier);
        let chain = &mut self.buckets[bucket];
        if chain.iter().any(|c| c.identifier == course.identifier) {
            return false;
        }
        chain.push(course);
        true
    }

    /// Look up a record by identifier. The input is normalized first, so
    /// any whitespace/case variant of a stored key matches.
    #[must_use]
    pub fn search(&self, raw: &str) -> Option<&Course> {
        let key = normalize(raw);
        let bucket = self.bucket_of(&key);
        self.buckets[bucket].iter().find(|c| c.identifier == key)
    }

    /// Every stored record in bucket-then-chain order (no sort guarantee).
    /// Does not mutate the store.
    #[must_use]
    pub fn enumerate(&self) -> Vec<Course> {
        let mut out = Vec::with_capacity(self.len());
        for chain in &self.buckets {
            out.extend(chain.iter().cloned());
        }
        out
    }

    /// Every stored record, ordered by identifier.
    ///
    /// Adaptive: plain insertion sort for small collections, the standard
    /// sort otherwise. Keys are unique, so stability is moot and the output
    /// is identical either way.
    #[must_use]
    pub fn enumerate_sorted(&self) -> Vec<Course> {
        let mut records = self.enumerate();

        if records.len() < INSERTION_SORT_MAX {
            for i in 1..records.len() {
                let mut j = i;
                while j > 0 && records[j - 1].identifier > records[j].identifier {
                    records.swap(j - 1, j);
                    j -= 1;
                }
            }
        } else {
            records.sort_unstable_by(|a, b| a.identifier.cmp(&b.identifier));
        }

        records
    }

    fn bucket_of(&self, key: &str) -> usize {
        (hash_identifier(key) % self.buckets.len() as u64) as usize
    }
}

/// Polynomial rolling hash over the identifier's bytes: `h = h*31 + byte`,
/// wrapping in `u64` (always non-negative, so no sign fixup is needed).
fn hash_identifier(key: &str) -> u64 {
    key.bytes()
        .fold(0u64, |h, b| h.wrapping_mul(31).wrapping_add(u64::from(b)))
}
