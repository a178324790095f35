//! Identifier normalization.
//!
//! Every course identifier is normalized before it is hashed, compared, or
//! stored, so input variants like `"csci 200"` and `" CSCI200 "` collapse to
//! the single key `"CSCI200"`. Titles are *not* run through this — they keep
//! interior spacing and only get trimmed at parse time.

/// Canonicalize a raw course identifier.
///
/// Removes all whitespace (leading, trailing, and interior) and uppercases
/// the remainder. Idempotent: `normalize(normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}
