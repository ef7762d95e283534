//! Config file persistence
//!
//! Features:
//! - Pretty-printed JSON document
//! - Missing, empty, `null` or corrupt files recover to defaults
//! - Recovered defaults are written back immediately

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::settings::Config;

/// Errors from reading or writing the config file
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("config io error: {0}")]
    Io(#[from] io::Error),

    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed store for `Config`
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored config. `Ok(None)` means the document is `null`.
    pub fn read(&self) -> Result<Option<Config>, PersistError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str::<Option<Config>>(&json)?)
    }

    /// Write the config, creating parent directories as needed
    pub fn save(&self, config: &Config) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the config, falling back to defaults on any read failure.
    ///
    /// The result is always written back so the file exists and is well formed.
    pub fn load(&self) -> Config {
        let config = match self.read() {
            Ok(Some(config)) => {
                log::info!("Loaded config from {}", self.path.display());
                config
            }
            Ok(None) => {
                log::info!("Config at {} is empty, using defaults", self.path.display());
                Config::default()
            }
            Err(err) => {
                log::warn!("Using default config ({})", err);
                Config::default()
            }
        };

        if let Err(err) = self.save(&config) {
            log::warn!("Failed to save config to {}: {}", self.path.display(), err);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vessel-bounds-fix-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join("config.json")
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let store = ConfigStore::new(scratch_path("missing"));
        assert!(store.read().is_err());

        let config = store.load();
        assert_eq!(config, Config::default());
        assert_eq!(store.read().unwrap(), Some(Config::default()));
    }

    #[test]
    fn test_corrupt_file_writes_defaults() {
        let store = ConfigStore::new(scratch_path("corrupt"));
        store.save(&Config::silent()).unwrap();
        fs::write(store.path(), "{ LogInFile: nope").unwrap();

        assert!(matches!(store.read(), Err(PersistError::Json(_))));
        assert_eq!(store.load(), Config::default());
        assert_eq!(store.read().unwrap(), Some(Config::default()));
    }

    #[test]
    fn test_null_document_is_default() {
        let store = ConfigStore::new(scratch_path("null"));
        store.save(&Config::silent()).unwrap();
        fs::write(store.path(), "null").unwrap();

        assert_eq!(store.read().unwrap(), None);
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn test_existing_config_kept() {
        let store = ConfigStore::new(scratch_path("existing"));
        let config = Config {
            log_in_file: false,
            log_in_console: true,
        };
        store.save(&config).unwrap();

        assert_eq!(store.load(), config);
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"LogInFile\": false"));
    }
}
