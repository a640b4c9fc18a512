// OrderDesk - core/filter.rs
//
// The listing filter engine. All active filters are AND-combined;
// the free-text search is an OR across the view's searchable fields.
// Core layer: pure logic, no I/O or rendering dependencies.
//
// Every screen of the original console ran this same computation as a
// bespoke inline closure; this is the single shared implementation.

use crate::core::model::{ListingView, Record};
use crate::util::constants::WILDCARD_SELECTION;
use std::collections::BTreeMap;

/// User-selected filter state for one listing. Transient, never
/// persisted. All active parts are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Substring text search (case-insensitive). Empty = no filter.
    pub search_term: String,

    /// Selected value per categorical field. A field absent from the
    /// map, or mapped to the `all` wildcard, is not filtered.
    pub selections: BTreeMap<String, String>,
}

impl FilterCriteria {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && !self.selections.values().any(|v| v != WILDCARD_SELECTION)
    }

    /// Set a categorical selection. Selecting the wildcard clears the
    /// field's filter, as choosing "すべて" does in the console.
    pub fn select(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.selections.insert(field.into(), value.into());
    }

    /// Active (non-wildcard) selections.
    fn active_selections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .filter(|(_, v)| v.as_str() != WILDCARD_SELECTION)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Result of applying `FilterCriteria` to a record snapshot.
///
/// Holds indices into the original slice rather than cloned rows; the
/// input order is preserved, so the filtered listing renders rows in
/// the same order the snapshot supplied them.
#[derive(Debug, Clone)]
pub struct FilteredResult {
    /// Indices of matching records, ascending.
    pub indices: Vec<usize>,

    /// Size of the input snapshot.
    pub total_count: usize,
}

impl FilteredResult {
    /// Number of matching records.
    pub fn matched_count(&self) -> usize {
        self.indices.len()
    }

    /// Materialise the matching subset as borrowed rows, in order.
    pub fn items<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        self.indices.iter().map(|&i| &records[i]).collect()
    }
}

/// Apply filter criteria to a snapshot of records under a view's field
/// configuration.
///
/// A record is included iff it satisfies the search predicate AND all
/// active categorical predicates. The function is pure: given the same
/// snapshot and criteria it returns the same result, and it never
/// mutates a record. "No matches" is an empty result, not an error.
pub fn filter_records(
    records: &[Record],
    criteria: &FilterCriteria,
    view: &ListingView,
) -> FilteredResult {
    if criteria.is_empty() {
        return FilteredResult {
            indices: (0..records.len()).collect(),
            total_count: records.len(),
        };
    }

    let term_lower = criteria.search_term.to_lowercase();

    let indices = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_all(record, criteria, view, &term_lower))
        .map(|(idx, _)| idx)
        .collect();

    FilteredResult {
        indices,
        total_count: records.len(),
    }
}

/// Check if a single record matches all active filters.
fn matches_all(
    record: &Record,
    criteria: &FilterCriteria,
    view: &ListingView,
    term_lower: &str,
) -> bool {
    // Free-text search: OR across the view's searchable fields.
    // Comparison is case-insensitive by lowercasing both sides; full-width
    // and other non-cased characters compare by their string value, with
    // no normalisation (the console renders Japanese text verbatim).
    if !term_lower.is_empty() {
        let hit = view.searchable_fields.iter().any(|field| {
            record
                .display_value(field)
                .is_some_and(|value| value.to_lowercase().contains(term_lower))
        });
        if !hit {
            return false;
        }
    }

    // Categorical filters: exact match per field. A record missing the
    // field does not match an active selection on it.
    for (field, selected) in criteria.active_selections() {
        match record.display_value(field) {
            Some(value) if value == selected => {}
            _ => return false,
        }
    }

    true
}
