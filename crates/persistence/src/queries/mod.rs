// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `appointments`: Appointment lookups, listings, slot checks and history
//! - `tickets`: Ticket lookups and listings
//! - `reference`: Customers, vehicles, workers and the service catalog
//!
//! The `Persistence` adapter in `lib.rs` is the only caller.

pub mod appointments;
pub mod reference;
pub mod tickets;

/// Escape character used with every pattern from `contains_pattern`.
pub(crate) const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `term` literally anywhere in a column.
///
/// `%` and `_` in the term are escaped with `LIKE_ESCAPE`, so callers must
/// pass it to `.escape()`. `SQLite` `LIKE` is case-insensitive for ASCII,
/// which covers codes and plates.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern: String = String::from("%");
    for c in term.trim().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern(" abc "), "%abc%");
        assert_eq!(contains_pattern("%"), "%\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
