// OrderDesk - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for OrderDesk data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/orderdesk/ or %APPDATA%\OrderDesk\)
    pub config_dir: PathBuf,

    /// User views directory (e.g. ~/.config/orderdesk/views/)
    pub user_views_dir: PathBuf,

    /// Data directory for snapshots, caches, etc.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let user_views_dir = config_dir.join(constants::VIEWS_DIR_NAME);
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                views = %user_views_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                user_views_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                user_views_dir: fallback.join(constants::VIEWS_DIR_NAME),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[listing]` section.
    pub listing: ListingSection,
    /// `[views]` section.
    pub views: ViewsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[listing]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ListingSection {
    /// Maximum records accepted from a dataset file.
    pub max_records: Option<usize>,
}

/// `[views]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ViewsSection {
    /// Additional user views directory.
    pub user_views_directory: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Maximum records accepted from a dataset file.
    pub max_records: usize,

    /// User views directory override from config.
    pub user_views_dir: Option<PathBuf>,

    /// Logging level string (applied at logging init).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_records: constants::MAX_DATASET_RECORDS,
            user_views_dir: None,
            log_level: None,
        }
    }
}

const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Load `config.toml` from the config directory, if present.
///
/// A missing file is not an error (defaults apply). Out-of-range values
/// are reported and replaced by defaults; the config as a whole is only
/// rejected when the TOML itself cannot be parsed.
///
/// Warnings are returned rather than logged because the logging
/// subsystem is initialised with a level this config may supply.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<ConfigError>) {
    let path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings = Vec::new();

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), warnings);
        }
        Err(e) => {
            warnings.push(ConfigError::Io { path, source: e });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse { path, source: e });
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    if let Some(max_records) = raw.listing.max_records {
        if (constants::MIN_MAX_DATASET_RECORDS..=constants::ABSOLUTE_MAX_DATASET_RECORDS)
            .contains(&max_records)
        {
            config.max_records = max_records;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "listing.max_records".to_string(),
                value: max_records.to_string(),
                expected: format!(
                    "{}..={}",
                    constants::MIN_MAX_DATASET_RECORDS,
                    constants::ABSOLUTE_MAX_DATASET_RECORDS
                ),
            });
        }
    }

    if let Some(dir) = raw.views.user_views_directory {
        if dir.is_empty() {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "views.user_views_directory".to_string(),
                value: dir,
                expected: "a non-empty path".to_string(),
            });
        } else {
            config.user_views_dir = Some(PathBuf::from(dir));
        }
    }

    if let Some(level) = raw.logging.level {
        if VALID_LOG_LEVELS.contains(&level.as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level,
                expected: VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.max_records, constants::MAX_DATASET_RECORDS);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_valid_config_applies() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[listing]\nmax_records = 500\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.max_records, 500);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_value_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[listing]\nmax_records = 1\n",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.max_records, constants::MAX_DATASET_RECORDS);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[logging]\nlevel = \"verbose\"\n",
        )
        .unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(constants::CONFIG_FILE_NAME),
            "[future_section]\nsetting = true\n",
        )
        .unwrap();
        let (_, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
    }
}
