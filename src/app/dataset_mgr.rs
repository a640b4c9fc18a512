// OrderDesk - app/dataset_mgr.rs
//
// Resolves the record snapshot a listing operates on: an external JSON
// file passed with --data, or the embedded sample dataset for the view.
// All filesystem access for datasets lives here; decoding is core.

use crate::core::dataset;
use crate::core::model::{ListingView, Record};
use crate::util::error::{DatasetError, OrderDeskError, Result};
use std::path::Path;

/// Load the snapshot for a view, preferring an explicit file.
///
/// Runs the view's validation checks on the loaded records; failures
/// are logged as warnings and never block the listing.
pub fn load_for_view(
    view: &ListingView,
    data_file: Option<&Path>,
    max_records: usize,
) -> Result<Vec<Record>> {
    let records = match data_file {
        Some(path) => load_dataset_file(path, max_records)?,
        None => {
            let records = dataset::load_builtin_dataset(&view.id)?;
            tracing::debug!(view_id = %view.id, records = records.len(), "Using sample dataset");
            records
        }
    };

    let failures = dataset::validate_records(&records, view);
    if failures > 0 {
        tracing::warn!(
            view_id = %view.id,
            failures,
            "Dataset loaded with validation warnings"
        );
    }

    Ok(records)
}

/// Read and decode a dataset JSON file, enforcing size and record caps.
pub fn load_dataset_file(path: &Path, max_records: usize) -> Result<Vec<Record>> {
    let metadata = std::fs::metadata(path).map_err(|e| OrderDeskError::Io {
        path: path.to_path_buf(),
        operation: "stat",
        source: e,
    })?;

    if metadata.len() > crate::util::constants::MAX_DATASET_FILE_SIZE {
        return Err(DatasetError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: crate::util::constants::MAX_DATASET_FILE_SIZE,
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| OrderDeskError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source: e,
    })?;

    let records = dataset::parse_dataset_json(&content, path)?;

    if records.len() > max_records {
        return Err(DatasetError::TooManyRecords {
            count: records.len(),
            max: max_records,
        }
        .into());
    }

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Dataset loaded"
    );

    Ok(records)
}
