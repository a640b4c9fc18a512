// OrderDesk - app/view_mgr.rs
//
// Manages loading of listing views from both built-in sources
// (embedded in the binary) and user-defined TOML files on disk.
// User views override built-in views with the same ID.

use crate::core::model::ListingView;
use crate::core::view;
use crate::util::constants;
use crate::util::error::ViewError;
use std::path::Path;

/// Load all available views: built-in first, then user-defined overrides.
///
/// User views with the same ID as a built-in view replace the built-in.
/// Invalid views are logged and skipped (non-fatal).
///
/// Returns the merged list and any non-fatal errors encountered.
pub fn load_all_views(user_views_dir: Option<&Path>) -> (Vec<ListingView>, Vec<ViewError>) {
    let mut views = view::load_builtin_views();
    let mut errors = Vec::new();

    tracing::info!(builtin_count = views.len(), "Loaded built-in views");

    if let Some(dir) = user_views_dir {
        if dir.is_dir() {
            let (user_views, user_errors) = load_user_views(dir);
            errors.extend(user_errors);

            for user_view in user_views {
                if let Some(pos) = views.iter().position(|v| v.id == user_view.id) {
                    tracing::info!(view_id = %user_view.id, "User view overrides built-in");
                    views[pos] = user_view;
                } else {
                    tracing::info!(view_id = %user_view.id, "Loaded user-defined view");
                    views.push(user_view);
                }
            }
        } else {
            tracing::debug!(
                dir = %dir.display(),
                "User views directory does not exist (skipping)"
            );
        }
    }

    // Enforce maximum view count
    if views.len() > constants::MAX_VIEWS {
        tracing::warn!(
            count = views.len(),
            max = constants::MAX_VIEWS,
            "Too many views loaded, truncating"
        );
        errors.push(ViewError::TooManyViews {
            count: views.len(),
            max: constants::MAX_VIEWS,
        });
        views.truncate(constants::MAX_VIEWS);
    }

    tracing::info!(total = views.len(), "View loading complete");

    (views, errors)
}

/// Find a loaded view by id.
pub fn find_view<'a>(views: &'a [ListingView], view_id: &str) -> Result<&'a ListingView, ViewError> {
    views
        .iter()
        .find(|v| v.id == view_id)
        .ok_or_else(|| ViewError::UnknownView {
            view_id: view_id.to_string(),
        })
}

/// Load user-defined views from a directory.
fn load_user_views(dir: &Path) -> (Vec<ListingView>, Vec<ViewError>) {
    let mut views = Vec::new();
    let mut errors = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(ViewError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return (views, errors);
        }
    };

    for entry_result in entries {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                errors.push(ViewError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                });
                continue;
            }
        };

        let path = entry.path();

        // Only process .toml files
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }

        // Check file size
        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                errors.push(ViewError::Io {
                    path: path.clone(),
                    source: e,
                });
                continue;
            }
        };

        if metadata.len() > constants::MAX_VIEW_FILE_SIZE {
            errors.push(ViewError::FileTooLarge {
                path: path.clone(),
                size: metadata.len(),
                max_size: constants::MAX_VIEW_FILE_SIZE,
            });
            continue;
        }

        // Read and parse the view
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                errors.push(ViewError::Io {
                    path: path.clone(),
                    source: e,
                });
                continue;
            }
        };

        match view::parse_view_toml(&content, &path)
            .and_then(|def| view::validate_and_compile(def, false))
        {
            Ok(v) => views.push(v),
            Err(e) => errors.push(e),
        }
    }

    (views, errors)
}
