//! Preference persistence - one JSON document on disk holding the whole
//! [`AppConfig`], written atomically on every accepted change.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::StoreError;

/// Load/save access to the preference file.
///
/// A missing file is [`StoreError::NotFound`] and callers fall back to
/// defaults. A file that exists but fails to parse or validate is
/// [`StoreError::Corrupt`]: the load fails as a whole, no field is silently
/// replaced by its default.
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

    /// Read and validate the stored preferences.
    pub fn load(&self) -> Result<AppConfig, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()))
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let config: AppConfig =
            serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        config
            .layout
            .validate()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        log::info!("loaded preferences from {}", self.path.display());
        Ok(config)
    }

    /// Persist the whole configuration as one unit.
    ///
    /// Writes a sibling temp file first and renames it into place, so a
    /// crash mid-save never leaves a half-written store behind.
    pub fn save(&self, config: &AppConfig) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        log::debug!("saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("prefs.json"));
        match store.load() {
            Err(StoreError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("prefs.json"));

        let mut config = AppConfig::default();
        config.generate.lot_code = "B771".to_string();
        config.layout.columns = 4;

        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        match ConfigStore::new(&path).load() {
            Err(StoreError::Corrupt(_)) => {}
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn invalid_geometry_is_corrupt_not_defaulted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut config = AppConfig::default();
        config.layout.columns = 0;
        fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        match ConfigStore::new(&path).load() {
            Err(StoreError::Corrupt(_)) => {}
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn missing_key_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        // A structurally incomplete document must not load with partial
        // defaults mixed in.
        let mut value: serde_json::Value =
            serde_json::to_value(AppConfig::default()).unwrap();
        value["layout"]
            .as_object_mut()
            .unwrap()
            .remove("label_size");
        fs::write(&path, value.to_string()).unwrap();

        match ConfigStore::new(&path).load() {
            Err(StoreError::Corrupt(_)) => {}
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }
}
