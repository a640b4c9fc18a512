// OrderDesk - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no
// rendering, no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// Field values
// =============================================================================

/// A single field value within a record.
///
/// The console's rows only ever hold flat scalar data: identifiers,
/// names, dates rendered as strings, quantities, prices, and
/// confirmation flags. Nested structures are rejected at dataset load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    /// The string form used for searching, exact-match filtering, and
    /// display. Numbers render via `Display` (no trailing `.0` for
    /// integral values); booleans render as `true`/`false`.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// =============================================================================
// Record (one row of any domain list)
// =============================================================================

/// One row of a domain list: order, shipping instruction, delivery
/// instruction, agreement target, customer, product, or user.
///
/// Records are opaque to the engine. Which fields are searchable,
/// categorical, or status-bearing is decided by the `ListingView`
/// applied to them, never by the record itself. The engine treats
/// records as read-only snapshots and never mutates them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. Used by dataset decoding and tests.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// The display string for a field, or `None` if the record lacks it.
    pub fn display_value(&self, field: &str) -> Option<String> {
        self.fields.get(field).map(FieldValue::display)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Listing view (runtime representation)
// =============================================================================

/// A categorical exact-match filter: one dropdown on the original
/// screen, with its closed option set. The implicit `all` wildcard is
/// not stored; an absent or wildcard selection means "no filter".
#[derive(Debug, Clone)]
pub struct CategoricalFilter {
    /// Record field the filter compares against.
    pub field: String,

    /// Human-readable filter label (e.g. "ステータス").
    pub label: String,

    /// Closed set of selectable values, in display order.
    pub values: Vec<String>,
}

/// A displayed table column: record field plus its heading.
#[derive(Debug, Clone)]
pub struct Column {
    pub field: String,
    pub heading: String,
}

/// Runtime representation of a listing view after TOML parsing and
/// validation pattern compilation. One view per console screen.
///
/// Built from `ViewDefinition` (the raw TOML structure) via validation.
#[derive(Debug, Clone)]
pub struct ListingView {
    /// Unique view identifier (e.g. "orders").
    pub id: String,

    /// Human-readable screen title (e.g. "受注一覧").
    pub name: String,

    /// Description of what this view lists.
    pub description: String,

    /// Fields the free-text search box tests, in declaration order.
    /// A record matches if ANY of these contains the term.
    pub searchable_fields: Vec<String>,

    /// Categorical exact-match filters, in display order.
    pub categorical: Vec<CategoricalFilter>,

    /// Field holding the workflow status label, if the screen shows
    /// status badges and summary counts.
    pub status_field: Option<String>,

    /// Recognised status labels, in workflow order. Values outside
    /// this set are displayed but never counted.
    pub status_values: Vec<String>,

    /// Table columns in display order.
    pub columns: Vec<Column>,

    /// Compiled per-field validation patterns, applied as warnings at
    /// dataset load time.
    pub field_patterns: Vec<(String, Regex)>,

    /// Fields expected to hold `YYYY-MM-DD` dates, checked at dataset
    /// load time.
    pub date_fields: Vec<String>,

    /// Whether this is a built-in view (true) or user-defined (false).
    pub is_builtin: bool,
}

impl ListingView {
    /// Look up the categorical filter declared for a field, if any.
    pub fn categorical_filter(&self, field: &str) -> Option<&CategoricalFilter> {
        self.categorical.iter().find(|c| c.field == field)
    }

    /// Whether the view carries a status summary.
    pub fn has_summary(&self) -> bool {
        self.status_field.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("ABC商事".into()).display(), "ABC商事");
        assert_eq!(FieldValue::Number(100.0).display(), "100");
        assert_eq!(FieldValue::Number(25.5).display(), "25.5");
        assert_eq!(FieldValue::Bool(true).display(), "true");
    }

    #[test]
    fn test_record_display_value_missing_field() {
        let mut record = Record::new();
        record.set("customer", "ABC商事");
        assert_eq!(record.display_value("customer").as_deref(), Some("ABC商事"));
        assert_eq!(record.display_value("no_such_field"), None);
    }
}
