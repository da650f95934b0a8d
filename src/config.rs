//! Settings persistence.
//!
//! Settings live in a small JSON file with one recognized field,
//! `webhooks`: the raw preset blob, stored verbatim between sessions. The
//! file is re-read before every query and rewritten whole on every
//! mutation, so edits made by hand are picked up and last writer wins.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors that can occur when loading or saving settings.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the settings file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    ParseJson { path: PathBuf, source: serde_json::Error },
    /// Failed to write the settings file back.
    WriteFile { path: PathBuf, source: std::io::Error },
    /// The persisted `webhooks` value is not a string or null.
    InvalidSettings,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read settings file '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse settings file '{}': {}", path.display(), source)
            }
            Self::WriteFile { path, source } => {
                write!(f, "failed to write settings file '{}': {}", path.display(), source)
            }
            Self::InvalidSettings => write!(f, "settings value 'webhooks' is not a string"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
            Self::WriteFile { source, .. } => Some(source),
            Self::InvalidSettings => None,
        }
    }
}

#[derive(Default, Serialize, Deserialize)]
struct SettingsFile {
    /// Kept as a raw JSON value so a corrupted type surfaces as
    /// `InvalidSettings` on access instead of failing the whole load.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    webhooks: serde_json::Value,
}

pub struct Config {
    path: PathBuf,
    settings: SettingsFile,
}

impl Config {
    /// Load settings from `path`. A missing file is a first run, not an
    /// error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let settings = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseJson { path: path.clone(), source: e })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SettingsFile::default(),
            Err(e) => return Err(ConfigError::ReadFile { path, source: e }),
        };
        Ok(Self { path, settings })
    }

    /// The raw preset blob, or an error if the persisted value has been
    /// corrupted into a non-string type.
    pub fn webhooks(&self) -> Result<Option<&str>, ConfigError> {
        match &self.settings.webhooks {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(s) => Ok(Some(s)),
            _ => Err(ConfigError::InvalidSettings),
        }
    }

    pub fn set_webhooks(&mut self, blob: String) {
        self.settings.webhooks = serde_json::Value::String(blob);
    }

    /// Rewrite the settings file in full.
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| ConfigError::ParseJson { path: self.path.clone(), source: e })?;
        std::fs::write(&self.path, content)
            .map_err(|e| ConfigError::WriteFile { path: self.path.clone(), source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_settings(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_webhooks() {
        let file = write_settings(r#"{ "webhooks": "work!https://example.com/hook" }"#);
        let config = Config::load(file.path()).expect("should load");
        assert_eq!(
            config.webhooks().unwrap(),
            Some("work!https://example.com/hook")
        );
    }

    #[test]
    fn test_load_null_webhooks() {
        let file = write_settings(r#"{ "webhooks": null }"#);
        let config = Config::load(file.path()).expect("should load");
        assert_eq!(config.webhooks().unwrap(), None);
    }

    #[test]
    fn test_load_absent_webhooks() {
        let file = write_settings("{}");
        let config = Config::load(file.path()).expect("should load");
        assert_eq!(config.webhooks().unwrap(), None);
    }

    #[test]
    fn test_missing_file_is_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("settings.json")).expect("should load");
        assert_eq!(config.webhooks().unwrap(), None);
    }

    #[test]
    fn test_corrupt_webhooks_type() {
        let file = write_settings(r#"{ "webhooks": 42 }"#);
        let config = Config::load(file.path()).expect("load itself succeeds");
        assert!(matches!(
            config.webhooks(),
            Err(ConfigError::InvalidSettings)
        ));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_settings("{ not json }");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::ParseJson { .. })
        ));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut config = Config::load(&path).unwrap();
        config.set_webhooks("work!url".to_string());
        config.save().unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded.webhooks().unwrap(), Some("work!url"));
    }
}
