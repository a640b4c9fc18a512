// OrderDesk - core/dataset.rs
//
// Dataset decoding: a JSON snapshot of flat objects becomes the record
// collection a listing operates on. Core layer: accepts strings, never
// touches the filesystem; I/O is handled by app::dataset_mgr.
//
// Sample datasets reproducing the original console's rows are embedded
// so every built-in view is usable out of the box.

use crate::core::model::{FieldValue, ListingView, Record};
use crate::util::constants;
use crate::util::error::DatasetError;
use chrono::NaiveDate;
use std::path::Path;

/// Decode a JSON array of flat objects into records.
///
/// Accepted values are strings, numbers, and booleans. Null and nested
/// values are rejected: the console's rows are flat, and a nested value
/// here means the wrong file was passed.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_dataset_json(content: &str, source_path: &Path) -> Result<Vec<Record>, DatasetError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| DatasetError::JsonParse {
            path: source_path.to_path_buf(),
            source: e,
        })?;

    let rows = value.as_array().ok_or_else(|| DatasetError::NotAnArray {
        path: source_path.to_path_buf(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let object = row.as_object().ok_or_else(|| DatasetError::NotAnArray {
            path: source_path.to_path_buf(),
        })?;

        let mut record = Record::new();
        for (field, raw) in object {
            let value = match raw {
                serde_json::Value::String(s) => FieldValue::Text(s.clone()),
                serde_json::Value::Bool(b) => FieldValue::Bool(*b),
                serde_json::Value::Number(n) => match n.as_f64() {
                    Some(f) => FieldValue::Number(f),
                    None => {
                        return Err(DatasetError::UnsupportedValue {
                            path: source_path.to_path_buf(),
                            record_index: index,
                            field: field.clone(),
                        })
                    }
                },
                _ => {
                    return Err(DatasetError::UnsupportedValue {
                        path: source_path.to_path_buf(),
                        record_index: index,
                        field: field.clone(),
                    })
                }
            };
            record.set(field.clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}

/// Apply a view's validation rules to a freshly loaded dataset.
///
/// Pattern and date-format failures are warnings, never rejection:
/// records are operator data, and the console must still list the rows
/// one wants to inspect. Missing fields are not flagged (screens
/// tolerate sparse rows). Returns the number of failed checks; at most
/// `MAX_VALIDATION_WARNINGS` are individually logged.
pub fn validate_records(records: &[Record], view: &ListingView) -> usize {
    let mut failures = 0usize;

    let mut warn = |index: usize, field: &str, value: &str, expected: &str| {
        failures += 1;
        if failures <= constants::MAX_VALIDATION_WARNINGS {
            tracing::warn!(
                view_id = %view.id,
                record = index,
                field,
                value,
                expected,
                "Dataset validation check failed"
            );
        }
    };

    for (index, record) in records.iter().enumerate() {
        for (field, pattern) in &view.field_patterns {
            if let Some(value) = record.display_value(field) {
                if !pattern.is_match(&value) {
                    warn(index, field, &value, pattern.as_str());
                }
            }
        }

        for field in &view.date_fields {
            if let Some(value) = record.display_value(field) {
                if NaiveDate::parse_from_str(&value, constants::DATE_FIELD_FORMAT).is_err() {
                    warn(index, field, &value, constants::DATE_FIELD_FORMAT);
                }
            }
        }
    }

    if failures > constants::MAX_VALIDATION_WARNINGS {
        tracing::warn!(
            view_id = %view.id,
            total = failures,
            logged = constants::MAX_VALIDATION_WARNINGS,
            "Further dataset validation failures suppressed"
        );
    }

    failures
}

// =============================================================================
// Built-in sample datasets (embedded at compile time)
// =============================================================================

/// Embedded JSON content for the sample datasets, keyed by view id.
pub fn builtin_dataset_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        ("orders", include_str!("../../data/orders.json")),
        (
            "shipping-instructions",
            include_str!("../../data/shipping_instructions.json"),
        ),
        (
            "shipping-status",
            include_str!("../../data/shipping_status.json"),
        ),
        (
            "delivery-instructions",
            include_str!("../../data/delivery_instructions.json"),
        ),
        (
            "delivery-status",
            include_str!("../../data/delivery_status.json"),
        ),
        (
            "agreement-targets",
            include_str!("../../data/agreement_targets.json"),
        ),
        ("customers", include_str!("../../data/customers.json")),
        ("products", include_str!("../../data/products.json")),
        ("users", include_str!("../../data/users.json")),
    ]
}

/// Decode the embedded sample dataset for a view.
pub fn load_builtin_dataset(view_id: &str) -> Result<Vec<Record>, DatasetError> {
    let content = builtin_dataset_sources()
        .into_iter()
        .find(|(id, _)| *id == view_id)
        .map(|(_, content)| content)
        .ok_or_else(|| DatasetError::NoBuiltinDataset {
            view_id: view_id.to_string(),
        })?;

    let path = Path::new("<builtin>").join(format!("{view_id}.json"));
    parse_dataset_json(content, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::{parse_view_toml, validate_and_compile};
    use std::path::PathBuf;

    #[test]
    fn test_parse_flat_objects() {
        let json = r#"[
            {"order_number": "2024-001", "customer": "ABC商事", "quantity": 100, "confirmed": false}
        ]"#;
        let records = parse_dataset_json(json, Path::new("test.json")).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.display_value("customer").as_deref(), Some("ABC商事"));
        assert_eq!(record.display_value("quantity").as_deref(), Some("100"));
        assert_eq!(record.display_value("confirmed").as_deref(), Some("false"));
    }

    #[test]
    fn test_empty_array_is_valid() {
        let records = parse_dataset_json("[]", Path::new("test.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_top_level_object_rejected() {
        let result = parse_dataset_json(r#"{"orders": []}"#, Path::new("test.json"));
        assert!(matches!(result.unwrap_err(), DatasetError::NotAnArray { .. }));
    }

    #[test]
    fn test_nested_value_rejected() {
        let json = r#"[{"order_number": "2024-001", "lines": [{"item": "A"}]}]"#;
        let result = parse_dataset_json(json, Path::new("test.json"));
        match result.unwrap_err() {
            DatasetError::UnsupportedValue { field, .. } => assert_eq!(field, "lines"),
            other => panic!("Expected UnsupportedValue, got: {other:?}"),
        }
    }

    #[test]
    fn test_null_value_rejected() {
        let json = r#"[{"order_number": null}]"#;
        let result = parse_dataset_json(json, Path::new("test.json"));
        assert!(matches!(
            result.unwrap_err(),
            DatasetError::UnsupportedValue { .. }
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = parse_dataset_json("[{", Path::new("test.json"));
        assert!(matches!(result.unwrap_err(), DatasetError::JsonParse { .. }));
    }

    fn view_with_checks() -> crate::core::model::ListingView {
        let toml = r#"
[view]
id = "checked"
name = "Checked"

[listing]
searchable_fields = ["order_number"]

[validation]
date_fields = ["order_date"]

[validation.patterns]
order_number = '^\d{4}-\d{3}$'
"#;
        let def = parse_view_toml(toml, &PathBuf::from("test.toml")).unwrap();
        validate_and_compile(def, true).unwrap()
    }

    #[test]
    fn test_validate_records_counts_failures() {
        let json = r#"[
            {"order_number": "2024-001", "order_date": "2024-01-15"},
            {"order_number": "bad", "order_date": "2024-01-16"},
            {"order_number": "2024-003", "order_date": "Jan 17"}
        ]"#;
        let records = parse_dataset_json(json, Path::new("test.json")).unwrap();
        let failures = validate_records(&records, &view_with_checks());
        assert_eq!(failures, 2);
    }

    #[test]
    fn test_validate_records_tolerates_missing_fields() {
        let json = r#"[{"customer": "ABC商事"}]"#;
        let records = parse_dataset_json(json, Path::new("test.json")).unwrap();
        assert_eq!(validate_records(&records, &view_with_checks()), 0);
    }

    #[test]
    fn test_builtin_datasets_decode() {
        for (view_id, _) in builtin_dataset_sources() {
            let records = load_builtin_dataset(view_id).unwrap();
            assert!(!records.is_empty(), "dataset for '{view_id}' is empty");
        }
    }

    #[test]
    fn test_unknown_builtin_dataset() {
        assert!(matches!(
            load_builtin_dataset("no-such-view").unwrap_err(),
            DatasetError::NoBuiltinDataset { .. }
        ));
    }
}
