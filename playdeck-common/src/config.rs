//! Configuration loading and resolution
//!
//! Settings resolve with the priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unparsable config file never terminates the program; it
//! degrades to defaults with a warning.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable for the strict-validation toggle
pub const ENV_STRICT: &str = "PLAYDECK_STRICT";
/// Environment variable for the diagnostics log path
pub const ENV_LOG_FILE: &str = "PLAYDECK_LOG_FILE";
/// Environment variable for the markdown library directory
pub const ENV_LIBRARY: &str = "PLAYDECK_LIBRARY";

/// Optional settings from the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Treat recoverable field defects as record-dropping errors
    pub strict: Option<bool>,
    /// Where the append-only diagnostics log lives
    pub log_file: Option<String>,
    /// Directory scanned for `.md` catalog files
    pub library: Option<String>,
}

impl TomlConfig {
    /// Load the config file, falling back to defaults when it is missing or
    /// malformed. `path` of `None` means the platform default location.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Self::default(),
            },
        };
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "could not read config file {}: {}; using defaults",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring malformed config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Platform default config file location (`<config dir>/playdeck/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("playdeck").join("config.toml"))
}

/// Resolve the strict-mode toggle
pub fn resolve_strict(cli: Option<bool>, config: &TomlConfig) -> bool {
    if let Some(strict) = cli {
        return strict;
    }
    if let Ok(value) = std::env::var(ENV_STRICT) {
        return matches!(value.trim(), "1" | "true" | "yes");
    }
    config.strict.unwrap_or(false)
}

/// Resolve the diagnostics log path
pub fn resolve_log_file(cli: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(ENV_LOG_FILE) {
        return PathBuf::from(path);
    }
    if let Some(path) = &config.log_file {
        return PathBuf::from(path);
    }
    default_log_file()
}

/// `<data-local dir>/playdeck/logs/errors.log`, or a relative `logs/errors.log`
/// when the platform reports no data directory
pub fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("playdeck").join("logs").join("errors.log"))
        .unwrap_or_else(|| PathBuf::from("logs").join("errors.log"))
}

/// Resolve the markdown library directory scanned when no paths are given
pub fn resolve_library(cli: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(ENV_LIBRARY) {
        return PathBuf::from(path);
    }
    if let Some(path) = &config.library {
        return PathBuf::from(path);
    }
    PathBuf::from("catalog")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_config_missing_file_is_default() {
        let config = TomlConfig::load(Some(Path::new("/nonexistent/playdeck.toml")));
        assert!(config.strict.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_toml_config_parses_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "strict = true\nlog_file = \"x.log\"\n").unwrap();
        let config = TomlConfig::load(Some(&path));
        assert_eq!(config.strict, Some(true));
        assert_eq!(config.log_file.as_deref(), Some("x.log"));
    }

    #[test]
    fn test_toml_config_malformed_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "strict = [not toml").unwrap();
        let config = TomlConfig::load(Some(&path));
        assert!(config.strict.is_none());
    }

    #[test]
    fn test_resolve_strict_cli_wins() {
        let config = TomlConfig {
            strict: Some(false),
            ..Default::default()
        };
        assert!(resolve_strict(Some(true), &config));
    }
}
