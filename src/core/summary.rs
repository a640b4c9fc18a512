// OrderDesk - core/summary.rs
//
// Status summary derivation: counts of records per recognised status
// label within an already-filtered subset. Rendered as the badge
// counters above the original console's tables.
// Core layer: pure logic, no I/O or rendering dependencies.

use crate::core::model::Record;

/// Per-status counts for a filtered listing.
///
/// `counts` reports every recognised label in declaration (workflow)
/// order, including zero counts. Labels outside the recognised set are
/// ignored, mirroring the console's hardcoded badge sets: an
/// unrecognised status renders in the table but is never counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    /// (status label, count) in declaration order.
    pub counts: Vec<(String, usize)>,

    /// Number of items summarised (the filtered subset size).
    pub total: usize,
}

impl StatusSummary {
    /// Count for a single label; zero if the label is not recognised.
    pub fn count_for(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, n)| *n)
    }

    /// Sum of the per-label counts. Equals `total` when `status_values`
    /// covered every status present in the items.
    pub fn counted(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Count the items per recognised status label.
///
/// `items` is an already-filtered subset; `status_field` names the
/// field to group by; `status_values` is the ordered set of recognised
/// labels to report, even at zero occurrences.
pub fn summarize(items: &[&Record], status_field: &str, status_values: &[String]) -> StatusSummary {
    let counts = status_values
        .iter()
        .map(|label| {
            let n = items
                .iter()
                .filter(|record| {
                    record
                        .get(status_field)
                        .and_then(|v| v.as_text())
                        .is_some_and(|v| v == label)
                })
                .count();
            (label.clone(), n)
        })
        .collect();

    StatusSummary {
        counts,
        total: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_target(status: &str) -> Record {
        let mut r = Record::new();
        r.set("agreement_status", status);
        r
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_in_declaration_order_with_zeros() {
        let records = vec![
            make_target("承認待ち"),
            make_target("承認済み"),
            make_target("承認待ち"),
        ];
        let items: Vec<&Record> = records.iter().collect();
        let summary = summarize(
            &items,
            "agreement_status",
            &labels(&["承認待ち", "承認済み", "要修正"]),
        );

        assert_eq!(
            summary.counts,
            vec![
                ("承認待ち".to_string(), 2),
                ("承認済み".to_string(), 1),
                ("要修正".to_string(), 0),
            ]
        );
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_counts_sum_to_total_when_labels_cover_items() {
        let records = vec![
            make_target("承認待ち"),
            make_target("要修正"),
            make_target("承認済み"),
            make_target("承認済み"),
        ];
        let items: Vec<&Record> = records.iter().collect();
        let summary = summarize(
            &items,
            "agreement_status",
            &labels(&["承認待ち", "承認済み", "要修正"]),
        );
        assert_eq!(summary.counted(), summary.total);
    }

    #[test]
    fn test_unrecognised_status_ignored_not_error() {
        let records = vec![make_target("承認待ち"), make_target("却下")];
        let items: Vec<&Record> = records.iter().collect();
        let summary = summarize(&items, "agreement_status", &labels(&["承認待ち"]));
        assert_eq!(summary.count_for("承認待ち"), 1);
        assert_eq!(summary.count_for("却下"), 0);
        assert_eq!(summary.total, 2);
        assert!(summary.counted() < summary.total);
    }

    #[test]
    fn test_empty_items_all_zero() {
        let items: Vec<&Record> = Vec::new();
        let summary = summarize(&items, "agreement_status", &labels(&["承認待ち", "承認済み"]));
        assert_eq!(summary.total, 0);
        assert!(summary.counts.iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn test_missing_status_field_not_counted() {
        let records = vec![Record::new(), make_target("承認待ち")];
        let items: Vec<&Record> = records.iter().collect();
        let summary = summarize(&items, "agreement_status", &labels(&["承認待ち"]));
        assert_eq!(summary.count_for("承認待ち"), 1);
        assert_eq!(summary.total, 2);
    }
}
