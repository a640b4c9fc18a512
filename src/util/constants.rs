// OrderDesk - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "OrderDesk";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "OrderDesk";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Filtering
// =============================================================================

/// Wildcard selection value meaning "do not filter on this field".
/// Matches the `all` option every dropdown in the console carries.
pub const WILDCARD_SELECTION: &str = "all";

// =============================================================================
// View limits
// =============================================================================

/// Maximum number of listing views that can be loaded (built-in + user).
pub const MAX_VIEWS: usize = 100;

/// Maximum size of a view TOML file in bytes.
pub const MAX_VIEW_FILE_SIZE: u64 = 64 * 1024; // 64 KB

/// Maximum regex pattern length in a view's [validation] table,
/// to prevent ReDoS from user-supplied patterns.
pub const MAX_VALIDATION_PATTERN_LENGTH: usize = 4_096;

/// Maximum number of searchable fields a single view may declare.
pub const MAX_SEARCHABLE_FIELDS: usize = 32;

/// Maximum number of categorical filters a single view may declare.
pub const MAX_CATEGORICAL_FIELDS: usize = 16;

// =============================================================================
// Dataset limits
// =============================================================================

/// Maximum size of a dataset JSON file in bytes.
pub const MAX_DATASET_FILE_SIZE: u64 = 32 * 1024 * 1024; // 32 MB

/// Maximum number of records accepted from a single dataset.
/// The console targets tens to low thousands of rows; this cap guards
/// against loading an unrelated multi-gigabyte file by mistake.
pub const MAX_DATASET_RECORDS: usize = 100_000;

/// Minimum user-configurable record cap.
pub const MIN_MAX_DATASET_RECORDS: usize = 100;

/// Hard upper bound on the user-configurable record cap.
pub const ABSOLUTE_MAX_DATASET_RECORDS: usize = 1_000_000;

/// Maximum number of dataset validation warnings logged per load.
/// Further failures are counted but not individually logged.
pub const MAX_VALIDATION_WARNINGS: usize = 100;

/// Date format expected by date-field well-formedness checks
/// (e.g. 2024-01-15, as every date column in the console renders).
pub const DATE_FIELD_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Rendering
// =============================================================================

/// Maximum rendered width of a single cell, in characters, before
/// truncation with an ellipsis. Keeps one pathological field from
/// destroying the table layout.
pub const MAX_CELL_WIDTH: usize = 40;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User views subdirectory name.
pub const VIEWS_DIR_NAME: &str = "views";
