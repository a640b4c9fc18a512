// OrderDesk - app/query.rs
//
// Builds validated filter criteria from CLI input and runs one listing
// query: filter, then status summary over the filtered subset.
//
// The console UI made bad selections unrepresentable (fixed dropdowns);
// here the same guarantee is enforced up front with typed errors, so a
// typo surfaces instead of silently matching nothing.

use crate::core::filter::{self, FilterCriteria, FilteredResult};
use crate::core::model::{ListingView, Record};
use crate::core::summary::{self, StatusSummary};
use crate::util::constants::WILDCARD_SELECTION;
use crate::util::error::QueryError;

/// Split a `field=value` CLI argument.
pub fn parse_selection(argument: &str) -> Result<(String, String), QueryError> {
    match argument.split_once('=') {
        Some((field, value)) if !field.is_empty() && !value.is_empty() => {
            Ok((field.to_string(), value.to_string()))
        }
        _ => Err(QueryError::MalformedSelection {
            argument: argument.to_string(),
        }),
    }
}

/// Build criteria from a search term and selections, validated against
/// the view's declared filters and their closed option sets.
///
/// The wildcard `all` is always accepted and clears the field's filter.
pub fn build_criteria(
    view: &ListingView,
    search: Option<&str>,
    selections: &[(String, String)],
) -> Result<FilterCriteria, QueryError> {
    let mut criteria = FilterCriteria {
        search_term: search.unwrap_or("").to_string(),
        ..Default::default()
    };

    for (field, value) in selections {
        let categorical =
            view.categorical_filter(field)
                .ok_or_else(|| QueryError::NotCategorical {
                    view_id: view.id.clone(),
                    field: field.clone(),
                })?;

        if value != WILDCARD_SELECTION && !categorical.values.iter().any(|v| v == value) {
            return Err(QueryError::UnknownSelectionValue {
                view_id: view.id.clone(),
                field: field.clone(),
                value: value.clone(),
            });
        }

        criteria.select(field.clone(), value.clone());
    }

    Ok(criteria)
}

/// One executed listing: the filtered subset plus its status summary.
#[derive(Debug)]
pub struct ListingOutcome<'a> {
    /// Matching rows, snapshot order preserved.
    pub items: Vec<&'a Record>,

    /// Raw filter result (counts and indices).
    pub result: FilteredResult,

    /// Per-status counts over the filtered subset, for views that
    /// declare a status field.
    pub summary: Option<StatusSummary>,
}

/// Run the filter engine and derive the status summary.
pub fn run<'a>(
    view: &ListingView,
    records: &'a [Record],
    criteria: &FilterCriteria,
) -> ListingOutcome<'a> {
    let result = filter::filter_records(records, criteria, view);
    let items = result.items(records);

    let summary = view
        .status_field
        .as_deref()
        .map(|status_field| summary::summarize(&items, status_field, &view.status_values));

    tracing::debug!(
        view_id = %view.id,
        total = result.total_count,
        matched = result.matched_count(),
        "Listing query executed"
    );

    ListingOutcome {
        items,
        result,
        summary,
    }
}
