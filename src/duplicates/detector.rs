//! Duplicate pair detection with deterministic ordering.

use std::collections::HashMap;

use crate::cache::FingerprintTable;

/// One detected duplicate pair: a second path sharing a fingerprint already
/// seen at another path. Transient; reported, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateReport {
    /// The shared fingerprint value.
    pub fingerprint: String,
    /// The path previously mapped to this fingerprint.
    pub previous: String,
    /// The path that collided with it.
    pub current: String,
}

/// Find all duplicate pairs in `table`.
///
/// Walks the table in its lexicographic key order and keeps an inverse map
/// from fingerprint to the most recently seen path. Each time a fingerprint
/// recurs, one report pairs the previous holder with the current path and
/// the inverse entry moves to the current path, so a group of n identical
/// fingerprints yields n-1 chained reports. Iteration order is total and
/// deterministic, which keeps the pairing reproducible for groups of three
/// or more.
#[must_use]
pub fn find_duplicates(table: &FingerprintTable) -> Vec<DuplicateReport> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    let mut reports = Vec::new();

    for (path, fingerprint) in table {
        if let Some(previous) = seen.insert(fingerprint.as_str(), path.as_str()) {
            reports.push(DuplicateReport {
                fingerprint: fingerprint.clone(),
                previous: previous.to_string(),
                current: path.clone(),
            });
        }
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(entries: &[(&str, &str)]) -> FingerprintTable {
        entries
            .iter()
            .map(|(p, f)| (p.to_string(), f.to_string()))
            .collect()
    }

    #[test]
    fn test_no_duplicates_in_distinct_table() {
        let table = table_of(&[("a.jpg", "0001"), ("b.jpg", "0002"), ("c.jpg", "0003")]);
        assert!(find_duplicates(&table).is_empty());
    }

    #[test]
    fn test_pair_reported_exactly_once() {
        let table = table_of(&[
            ("a.jpg", "ffff0000"),
            ("b.jpg", "ffff0000"),
            ("c.png", "1234abcd"),
        ]);

        let reports = find_duplicates(&table);
        assert_eq!(
            reports,
            vec![DuplicateReport {
                fingerprint: "ffff0000".to_string(),
                previous: "a.jpg".to_string(),
                current: "b.jpg".to_string(),
            }]
        );
    }

    #[test]
    fn test_group_of_three_yields_two_chained_reports() {
        let table = table_of(&[
            ("a.jpg", "ffff0000"),
            ("b.jpg", "ffff0000"),
            ("c.jpg", "ffff0000"),
        ]);

        let reports = find_duplicates(&table);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].previous, "a.jpg");
        assert_eq!(reports[0].current, "b.jpg");
        assert_eq!(reports[1].previous, "b.jpg");
        assert_eq!(reports[1].current, "c.jpg");
    }

    #[test]
    fn test_pairing_is_reproducible() {
        let table = table_of(&[
            ("x.jpg", "aaaa"),
            ("m.jpg", "aaaa"),
            ("b.jpg", "aaaa"),
            ("q.jpg", "aaaa"),
        ]);

        let first = find_duplicates(&table);
        for _ in 0..10 {
            assert_eq!(find_duplicates(&table), first);
        }
        // Lexicographic chaining regardless of insertion order above.
        assert_eq!(first[0].previous, "b.jpg");
        assert_eq!(first[0].current, "m.jpg");
        assert_eq!(first[1].current, "q.jpg");
        assert_eq!(first[2].current, "x.jpg");
    }

    #[test]
    fn test_multiple_independent_groups() {
        let table = table_of(&[
            ("a.jpg", "1111"),
            ("b.jpg", "2222"),
            ("c.jpg", "1111"),
            ("d.jpg", "2222"),
            ("e.jpg", "3333"),
        ]);

        let reports = find_duplicates(&table);
        assert_eq!(reports.len(), 2);
        assert!(reports
            .iter()
            .any(|r| r.fingerprint == "1111" && r.previous == "a.jpg" && r.current == "c.jpg"));
        assert!(reports
            .iter()
            .any(|r| r.fingerprint == "2222" && r.previous == "b.jpg" && r.current == "d.jpg"));
    }

    #[test]
    fn test_empty_table() {
        assert!(find_duplicates(&FingerprintTable::new()).is_empty());
    }
}
