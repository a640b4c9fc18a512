// OrderDesk - core/view.rs
//
// Listing view loading, validation, and compilation.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::view_mgr which feeds content here.
//
// A listing view is the declarative form of one console screen: which
// fields the search box tests, which dropdown filters exist with which
// closed option sets, which field carries the workflow status, and how
// the table is laid out.

use crate::core::model::{CategoricalFilter, Column, ListingView};
use crate::util::constants;
use crate::util::error::ViewError;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw TOML view definition as deserialized from a .toml file.
/// This is validated and compiled into a `ListingView` for runtime use.
#[derive(Debug, Deserialize)]
pub struct ViewDefinition {
    pub view: ViewMeta,
    pub listing: ListingDef,
    #[serde(default)]
    pub categorical: Vec<CategoricalDef>,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub validation: ValidationDef,
}

#[derive(Debug, Deserialize)]
pub struct ViewMeta {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ListingDef {
    pub searchable_fields: Vec<String>,
    #[serde(default)]
    pub status_field: Option<String>,
    #[serde(default)]
    pub status_values: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoricalDef {
    pub field: String,
    #[serde(default)]
    pub label: String,
    pub values: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ColumnDef {
    pub field: String,
    #[serde(default)]
    pub heading: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ValidationDef {
    /// Fields expected to hold YYYY-MM-DD dates.
    #[serde(default)]
    pub date_fields: Vec<String>,

    /// Per-field regex patterns records should match.
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,
}

// =============================================================================
// View validation and compilation
// =============================================================================

/// Parse a TOML string into a `ViewDefinition`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_view_toml(toml_content: &str, source_path: &Path) -> Result<ViewDefinition, ViewError> {
    toml::from_str(toml_content).map_err(|e| ViewError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate a `ViewDefinition` and compile it into a runtime `ListingView`.
///
/// Validates:
/// - Required fields are present and non-empty
/// - Field counts are within limits
/// - Categorical option sets are non-empty and fields are unique
/// - A status field comes with recognised status labels
/// - Validation patterns are valid regexes within size limits
///
/// Returns a fully compiled `ListingView` ready for use.
pub fn validate_and_compile(
    def: ViewDefinition,
    is_builtin: bool,
) -> Result<ListingView, ViewError> {
    let id = &def.view.id;

    if id.is_empty() {
        return Err(ViewError::MissingField {
            view_id: "(empty)".to_string(),
            field: "view.id",
        });
    }
    if def.view.name.is_empty() {
        return Err(ViewError::MissingField {
            view_id: id.clone(),
            field: "view.name",
        });
    }
    if def.listing.searchable_fields.is_empty() {
        return Err(ViewError::MissingField {
            view_id: id.clone(),
            field: "listing.searchable_fields",
        });
    }
    if def.listing.searchable_fields.len() > constants::MAX_SEARCHABLE_FIELDS {
        return Err(ViewError::TooManyFields {
            view_id: id.clone(),
            kind: "searchable",
            count: def.listing.searchable_fields.len(),
            max: constants::MAX_SEARCHABLE_FIELDS,
        });
    }
    if def.categorical.len() > constants::MAX_CATEGORICAL_FIELDS {
        return Err(ViewError::TooManyFields {
            view_id: id.clone(),
            kind: "categorical",
            count: def.categorical.len(),
            max: constants::MAX_CATEGORICAL_FIELDS,
        });
    }

    // Categorical filters: option sets must be closed and non-empty,
    // one filter per field.
    let mut categorical = Vec::with_capacity(def.categorical.len());
    for cat in def.categorical {
        if cat.field.is_empty() {
            return Err(ViewError::MissingField {
                view_id: id.clone(),
                field: "categorical.field",
            });
        }
        if cat.values.is_empty() {
            return Err(ViewError::EmptyOptionSet {
                view_id: id.clone(),
                field: cat.field,
            });
        }
        if categorical
            .iter()
            .any(|c: &CategoricalFilter| c.field == cat.field)
        {
            return Err(ViewError::DuplicateCategorical {
                view_id: id.clone(),
                field: cat.field,
            });
        }
        let label = if cat.label.is_empty() {
            cat.field.clone()
        } else {
            cat.label
        };
        categorical.push(CategoricalFilter {
            field: cat.field,
            label,
            values: cat.values,
        });
    }

    // A status field without recognised labels could never count anything.
    if def.listing.status_field.is_some() && def.listing.status_values.is_empty() {
        return Err(ViewError::MissingStatusValues {
            view_id: id.clone(),
        });
    }

    // Compile validation patterns with a length cap.
    let mut field_patterns = Vec::with_capacity(def.validation.patterns.len());
    for (field, pattern) in def.validation.patterns {
        let regex = compile_pattern(id, &field, &pattern)?;
        field_patterns.push((field, regex));
    }

    let columns = def
        .columns
        .into_iter()
        .map(|c| {
            let heading = if c.heading.is_empty() {
                c.field.clone()
            } else {
                c.heading
            };
            Column {
                field: c.field,
                heading,
            }
        })
        .collect();

    Ok(ListingView {
        id: id.clone(),
        name: def.view.name,
        description: def.view.description,
        searchable_fields: def.listing.searchable_fields,
        categorical,
        status_field: def.listing.status_field,
        status_values: def.listing.status_values,
        columns,
        field_patterns,
        date_fields: def.validation.date_fields,
        is_builtin,
    })
}

/// Compile a validation regex with length validation to prevent ReDoS.
fn compile_pattern(view_id: &str, field: &str, pattern: &str) -> Result<Regex, ViewError> {
    if pattern.len() > constants::MAX_VALIDATION_PATTERN_LENGTH {
        return Err(ViewError::PatternTooLong {
            view_id: view_id.to_string(),
            field: field.to_string(),
            length: pattern.len(),
            max_length: constants::MAX_VALIDATION_PATTERN_LENGTH,
        });
    }

    Regex::new(pattern).map_err(|e| ViewError::InvalidPattern {
        view_id: view_id.to_string(),
        field: field.to_string(),
        pattern: pattern.to_string(),
        source: e,
    })
}

// =============================================================================
// Built-in views (embedded at compile time)
// =============================================================================

/// Embedded TOML content for built-in views, one per console screen.
/// Each tuple is (filename, TOML content).
pub fn builtin_view_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        ("orders.toml", include_str!("../../views/orders.toml")),
        (
            "shipping_instructions.toml",
            include_str!("../../views/shipping_instructions.toml"),
        ),
        (
            "shipping_status.toml",
            include_str!("../../views/shipping_status.toml"),
        ),
        (
            "delivery_instructions.toml",
            include_str!("../../views/delivery_instructions.toml"),
        ),
        (
            "delivery_status.toml",
            include_str!("../../views/delivery_status.toml"),
        ),
        (
            "agreement_targets.toml",
            include_str!("../../views/agreement_targets.toml"),
        ),
        ("customers.toml", include_str!("../../views/customers.toml")),
        ("products.toml", include_str!("../../views/products.toml")),
        ("users.toml", include_str!("../../views/users.toml")),
    ]
}

/// Load and validate all built-in views.
///
/// Invalid views are logged as errors and skipped (non-fatal).
/// Returns the successfully loaded views.
pub fn load_builtin_views() -> Vec<ListingView> {
    let mut views = Vec::new();
    let mut failures = 0usize;

    for (filename, content) in builtin_view_sources() {
        let path = Path::new("<builtin>").join(filename);
        match parse_view_toml(content, &path).and_then(|def| validate_and_compile(def, true)) {
            Ok(view) => {
                tracing::debug!(view_id = %view.id, "Loaded built-in view");
                views.push(view);
            }
            Err(e) => {
                // Built-in view failures are bugs, but degrade gracefully
                tracing::error!(file = filename, error = %e, "Failed to load built-in view");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        tracing::warn!(count = failures, "Some built-in views failed to load");
    }

    views
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_VIEW_TOML: &str = r#"
[view]
id = "test-orders"
name = "受注一覧"
description = "A test view"

[listing]
searchable_fields = ["order_number", "customer"]
status_field = "status"
status_values = ["下書き", "配送中"]

[[categorical]]
field = "status"
label = "ステータス"
values = ["下書き", "配送中"]

[[columns]]
field = "order_number"
heading = "受注番号"

[validation]
date_fields = ["order_date"]

[validation.patterns]
order_number = '^\d{4}-\d{3}$'
"#;

    #[test]
    fn test_parse_valid_view() {
        let path = PathBuf::from("test.toml");
        let def = parse_view_toml(VALID_VIEW_TOML, &path).unwrap();
        assert_eq!(def.view.id, "test-orders");
        assert_eq!(def.listing.searchable_fields, vec!["order_number", "customer"]);
        assert_eq!(def.categorical.len(), 1);
    }

    #[test]
    fn test_compile_valid_view() {
        let path = PathBuf::from("test.toml");
        let def = parse_view_toml(VALID_VIEW_TOML, &path).unwrap();
        let view = validate_and_compile(def, false).unwrap();

        assert_eq!(view.id, "test-orders");
        assert!(!view.is_builtin);
        assert_eq!(view.status_field.as_deref(), Some("status"));
        assert_eq!(view.field_patterns.len(), 1);
        assert_eq!(view.columns[0].heading, "受注番号");
        assert!(view
            .categorical_filter("status")
            .is_some_and(|c| c.values.len() == 2));
    }

    #[test]
    fn test_missing_view_id() {
        let toml = r#"
[view]
id = ""
name = "Empty ID"

[listing]
searchable_fields = ["customer"]
"#;
        let path = PathBuf::from("bad.toml");
        let def = parse_view_toml(toml, &path).unwrap();
        let result = validate_and_compile(def, false);
        match result.unwrap_err() {
            ViewError::MissingField { field, .. } => assert_eq!(field, "view.id"),
            other => panic!("Expected MissingField, got: {other:?}"),
        }
    }

    #[test]
    fn test_empty_searchable_fields_rejected() {
        let toml = r#"
[view]
id = "no-search"
name = "No search"

[listing]
searchable_fields = []
"#;
        let path = PathBuf::from("bad.toml");
        let def = parse_view_toml(toml, &path).unwrap();
        let result = validate_and_compile(def, false);
        assert!(matches!(
            result.unwrap_err(),
            ViewError::MissingField {
                field: "listing.searchable_fields",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_option_set_rejected() {
        let toml = r#"
[view]
id = "empty-options"
name = "Empty options"

[listing]
searchable_fields = ["customer"]

[[categorical]]
field = "status"
values = []
"#;
        let path = PathBuf::from("bad.toml");
        let def = parse_view_toml(toml, &path).unwrap();
        assert!(matches!(
            validate_and_compile(def, false).unwrap_err(),
            ViewError::EmptyOptionSet { .. }
        ));
    }

    #[test]
    fn test_duplicate_categorical_rejected() {
        let toml = r#"
[view]
id = "dup"
name = "Duplicate"

[listing]
searchable_fields = ["customer"]

[[categorical]]
field = "status"
values = ["a"]

[[categorical]]
field = "status"
values = ["b"]
"#;
        let path = PathBuf::from("bad.toml");
        let def = parse_view_toml(toml, &path).unwrap();
        assert!(matches!(
            validate_and_compile(def, false).unwrap_err(),
            ViewError::DuplicateCategorical { .. }
        ));
    }

    #[test]
    fn test_status_field_without_values_rejected() {
        let toml = r#"
[view]
id = "no-labels"
name = "No labels"

[listing]
searchable_fields = ["customer"]
status_field = "status"
"#;
        let path = PathBuf::from("bad.toml");
        let def = parse_view_toml(toml, &path).unwrap();
        assert!(matches!(
            validate_and_compile(def, false).unwrap_err(),
            ViewError::MissingStatusValues { .. }
        ));
    }

    #[test]
    fn test_invalid_validation_pattern() {
        let toml = r#"
[view]
id = "bad-pattern"
name = "Bad pattern"

[listing]
searchable_fields = ["customer"]

[validation.patterns]
order_number = "[invalid"
"#;
        let path = PathBuf::from("bad.toml");
        let def = parse_view_toml(toml, &path).unwrap();
        assert!(matches!(
            validate_and_compile(def, false).unwrap_err(),
            ViewError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn test_pattern_too_long() {
        let long_pattern = "a".repeat(constants::MAX_VALIDATION_PATTERN_LENGTH + 1);
        let toml = format!(
            r#"
[view]
id = "long-pattern"
name = "Long pattern"

[listing]
searchable_fields = ["customer"]

[validation.patterns]
order_number = '{long_pattern}'
"#
        );
        let path = PathBuf::from("long.toml");
        let def = parse_view_toml(&toml, &path).unwrap();
        assert!(matches!(
            validate_and_compile(def, false).unwrap_err(),
            ViewError::PatternTooLong { .. }
        ));
    }

    #[test]
    fn test_load_builtin_views() {
        let views = load_builtin_views();
        assert_eq!(views.len(), 9, "all built-in views should load");
        for id in [
            "orders",
            "shipping-instructions",
            "shipping-status",
            "delivery-instructions",
            "delivery-status",
            "agreement-targets",
            "customers",
            "products",
            "users",
        ] {
            assert!(
                views.iter().any(|v| v.id == id),
                "built-in view '{id}' not found"
            );
        }
        assert!(views.iter().all(|v| v.is_builtin));
    }
}
