// OrderDesk - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all OrderDesk operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum OrderDeskError {
    /// View loading or validation failed.
    View(ViewError),

    /// Dataset loading or decoding failed.
    Dataset(DatasetError),

    /// A listing query was malformed.
    Query(QueryError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for OrderDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View(e) => write!(f, "View error: {e}"),
            Self::Dataset(e) => write!(f, "Dataset error: {e}"),
            Self::Query(e) => write!(f, "Query error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for OrderDeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::View(e) => Some(e),
            Self::Dataset(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// View errors
// ---------------------------------------------------------------------------

/// Errors related to listing view loading and validation.
#[derive(Debug)]
pub enum ViewError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// View file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is missing or empty in the view definition.
    MissingField {
        view_id: String,
        field: &'static str,
    },

    /// A categorical filter declares an empty option set.
    EmptyOptionSet { view_id: String, field: String },

    /// The same field is declared as a categorical filter twice.
    DuplicateCategorical { view_id: String, field: String },

    /// A status field is declared without any recognised status labels.
    MissingStatusValues { view_id: String },

    /// A regex pattern in the [validation] table is invalid.
    InvalidPattern {
        view_id: String,
        field: String,
        pattern: String,
        source: regex::Error,
    },

    /// A regex pattern exceeds the maximum allowed length.
    PatternTooLong {
        view_id: String,
        field: String,
        length: usize,
        max_length: usize,
    },

    /// Too many searchable or categorical fields declared.
    TooManyFields {
        view_id: String,
        kind: &'static str,
        count: usize,
        max: usize,
    },

    /// Maximum number of views exceeded.
    TooManyViews { count: usize, max: usize },

    /// No view with the requested id is loaded.
    UnknownView { view_id: String },

    /// I/O error reading a view file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "View '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { view_id, field } => {
                write!(f, "View '{view_id}': missing required field '{field}'")
            }
            Self::EmptyOptionSet { view_id, field } => write!(
                f,
                "View '{view_id}': categorical filter '{field}' has no option values"
            ),
            Self::DuplicateCategorical { view_id, field } => write!(
                f,
                "View '{view_id}': categorical filter '{field}' declared more than once"
            ),
            Self::MissingStatusValues { view_id } => write!(
                f,
                "View '{view_id}': status_field declared without status_values"
            ),
            Self::InvalidPattern {
                view_id,
                field,
                pattern,
                source,
            } => write!(
                f,
                "View '{view_id}': invalid validation pattern for '{field}' ('{pattern}'): {source}"
            ),
            Self::PatternTooLong {
                view_id,
                field,
                length,
                max_length,
            } => write!(
                f,
                "View '{view_id}': validation pattern for '{field}' is {length} chars, \
                 exceeds maximum of {max_length}"
            ),
            Self::TooManyFields {
                view_id,
                kind,
                count,
                max,
            } => write!(
                f,
                "View '{view_id}': {count} {kind} fields declared, maximum is {max}"
            ),
            Self::TooManyViews { count, max } => {
                write!(f, "Too many views loaded ({count}), maximum is {max}")
            }
            Self::UnknownView { view_id } => {
                write!(f, "No listing view with id '{view_id}'")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading view '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ViewError> for OrderDeskError {
    fn from(e: ViewError) -> Self {
        Self::View(e)
    }
}

// ---------------------------------------------------------------------------
// Dataset errors
// ---------------------------------------------------------------------------

/// Errors related to dataset loading and decoding.
#[derive(Debug)]
pub enum DatasetError {
    /// JSON could not be parsed.
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an array of objects.
    NotAnArray { path: PathBuf },

    /// A record holds a value the record model cannot represent
    /// (null, nested array, or nested object).
    UnsupportedValue {
        path: PathBuf,
        record_index: usize,
        field: String,
    },

    /// Dataset file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Dataset holds more records than the configured cap.
    TooManyRecords { count: usize, max: usize },

    /// No embedded dataset exists for the requested view.
    NoBuiltinDataset { view_id: String },

    /// I/O error reading a dataset file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonParse { path, source } => {
                write!(f, "Failed to parse JSON '{}': {source}", path.display())
            }
            Self::NotAnArray { path } => write!(
                f,
                "Dataset '{}' is not a JSON array of objects",
                path.display()
            ),
            Self::UnsupportedValue {
                path,
                record_index,
                field,
            } => write!(
                f,
                "Dataset '{}' record {record_index}: field '{field}' holds a null or \
                 nested value; only strings, numbers, and booleans are supported",
                path.display()
            ),
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Dataset '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::TooManyRecords { count, max } => {
                write!(f, "Dataset holds {count} records, maximum is {max}")
            }
            Self::NoBuiltinDataset { view_id } => {
                write!(
                    f,
                    "No sample dataset for view '{view_id}'; pass --data <file>"
                )
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading dataset '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::JsonParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DatasetError> for OrderDeskError {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

// ---------------------------------------------------------------------------
// Query errors
// ---------------------------------------------------------------------------

/// Errors related to listing query construction.
///
/// These mirror what the console UI makes unrepresentable: its dropdowns
/// only ever offer the view's declared fields and option values, so a
/// selection outside those sets is rejected up front rather than
/// silently matching nothing.
#[derive(Debug)]
pub enum QueryError {
    /// A selection names a field the view does not filter on.
    NotCategorical { view_id: String, field: String },

    /// A selection value is outside the field's closed option set.
    UnknownSelectionValue {
        view_id: String,
        field: String,
        value: String,
    },

    /// A --select argument was not of the form field=value.
    MalformedSelection { argument: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCategorical { view_id, field } => write!(
                f,
                "View '{view_id}' has no categorical filter on field '{field}'"
            ),
            Self::UnknownSelectionValue {
                view_id,
                field,
                value,
            } => write!(
                f,
                "'{value}' is not an option for filter '{field}' in view '{view_id}'"
            ),
            Self::MalformedSelection { argument } => {
                write!(f, "Selection '{argument}' is not of the form field=value")
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for OrderDeskError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for OrderDeskError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for OrderDesk results.
pub type Result<T> = std::result::Result<T, OrderDeskError>;
