//! Generic settings persistence coordination.
//!
//! Provides a reusable API for persisting dashboard settings to a key/value
//! storage. Values are stored as JSON strings under string keys.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Default settings file: `<config dir>/railsim/settings.json`.
static DEFAULT_SETTINGS_PATH: Lazy<Option<PathBuf>> =
    Lazy::new(|| dirs::config_dir().map(|dir| dir.join("railsim").join("settings.json")));

/// Storage key under which [`DashboardSettings`] are kept.
pub const DASHBOARD_SETTINGS_KEY: &str = "dashboard_settings";

/// Key/value string storage.
pub trait Storage {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: String);
    fn flush(&mut self);
}

/// In-memory storage, used when no settings file is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.data.insert(key.to_string(), value);
    }

    fn flush(&mut self) {}
}

/// Storage backed by a single JSON object file.
///
/// The file is read once on open and rewritten on every flush.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage at `path`. A missing file starts out empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse settings file: {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, data })
    }

    /// Opens the storage at `path`, logging and returning `None` if the
    /// file cannot be read or parsed.
    pub fn open_or_warn(path: impl Into<PathBuf>) -> Option<Self> {
        match Self::open(path) {
            Ok(storage) => Some(storage),
            Err(e) => {
                warn!("Ignoring settings file: {:#}", e);
                None
            }
        }
    }

    /// Opens the storage at the platform config location.
    ///
    /// Returns `None` if the platform has no config directory or the file
    /// is unreadable.
    pub fn open_default() -> Option<Self> {
        DEFAULT_SETTINGS_PATH.as_ref().and_then(|path| Self::open_or_warn(path.clone()))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current contents to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory: {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.data)
            .context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write settings file: {}", self.path.display()))
    }
}

impl Storage for FileStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.data.insert(key.to_string(), value);
    }

    fn flush(&mut self) {
        if let Err(e) = self.save() {
            warn!("{:#}", e);
        }
    }
}

/// User-tunable dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Number of history records requested per page
    pub history_page_size: usize,
    /// Whether the last history snapshot is reloaded on start
    pub restore_history_on_start: bool,
    /// Whether snapshots are written Brotli-compressed
    pub snapshot_compression: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            history_page_size: 20,
            restore_history_on_start: false,
            snapshot_compression: false,
        }
    }
}

/// Coordinates generic settings persistence.
///
/// This coordinator provides type-safe loading and saving of any serializable
/// settings to a [`Storage`]. Settings are stored as JSON strings.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting from storage with a default fallback.
    ///
    /// # Returns
    /// The deserialized value if found and valid, otherwise the default value for type T
    pub fn load_setting<T>(storage: Option<&dyn Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(storage, key).unwrap_or_default()
    }

    /// Loads a setting from storage with a custom default.
    pub fn load_setting_or<T>(storage: Option<&dyn Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        Self::try_load_setting(storage, key).unwrap_or(default)
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = storage?.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid setting '{}': {}", key, e);
                None
            }
        }
    }

    /// Saves a setting to storage and flushes it.
    pub fn save_setting<T>(storage: &mut dyn Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        if let Ok(json_str) = serde_json::to_string(value) {
            storage.set_string(key, json_str);
            storage.flush();
        }
    }

    /// Loads the dashboard settings, falling back to defaults.
    pub fn load_dashboard_settings(storage: Option<&dyn Storage>) -> DashboardSettings {
        Self::load_setting(storage, DASHBOARD_SETTINGS_KEY)
    }

    /// Loads the dashboard settings from `path`, or from the platform
    /// default location when `path` is `None`.
    ///
    /// An explicit path that cannot be read is an error. A default file that
    /// cannot be read falls back to defaults.
    pub fn load_dashboard_settings_from(path: Option<&Path>) -> Result<DashboardSettings> {
        let storage = match path {
            Some(path) => Some(FileStorage::open(path)?),
            None => FileStorage::open_default(),
        };
        Ok(Self::load_dashboard_settings(
            storage.as_ref().map(|s| s as &dyn Storage),
        ))
    }

    /// Saves the dashboard settings.
    pub fn save_dashboard_settings(storage: &mut dyn Storage, settings: &DashboardSettings) {
        Self::save_setting(storage, DASHBOARD_SETTINGS_KEY, settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_save_and_load_simple() {
        let mut storage = MemoryStorage::new();

        SettingsCoordinator::save_setting(&mut storage, "test_key", &42i32);

        let loaded: i32 = SettingsCoordinator::load_setting(Some(&storage), "test_key");
        assert_eq!(loaded, 42);
    }

    #[test]
    fn test_load_with_default() {
        let storage = MemoryStorage::new();

        let loaded: i32 = SettingsCoordinator::load_setting(Some(&storage), "missing_key");
        assert_eq!(loaded, 0);

        let loaded: i32 = SettingsCoordinator::load_setting_or(None, "missing_key", 7);
        assert_eq!(loaded, 7);
    }

    #[test]
    fn test_invalid_value_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set_string("page_size", "not json".to_string());

        let result: Option<usize> = SettingsCoordinator::try_load_setting(Some(&storage), "page_size");
        assert_eq!(result, None);
    }

    #[test]
    fn test_dashboard_settings_partial_json() {
        let mut storage = MemoryStorage::new();
        storage.set_string(DASHBOARD_SETTINGS_KEY, r#"{"history_page_size": 50}"#.to_string());

        let settings = SettingsCoordinator::load_dashboard_settings(Some(&storage));
        assert_eq!(settings.history_page_size, 50);
        assert!(!settings.snapshot_compression);
    }

    #[test]
    fn test_file_storage_round_trip() -> Result<()> {
        let path = env::temp_dir().join("railsim_settings_test").join("settings.json");
        let _ = fs::remove_file(&path);

        let settings = DashboardSettings {
            history_page_size: 5,
            restore_history_on_start: true,
            snapshot_compression: true,
        };

        {
            let mut storage = FileStorage::open(&path)?;
            SettingsCoordinator::save_dashboard_settings(&mut storage, &settings);
        }

        let storage = FileStorage::open(&path)?;
        assert_eq!(SettingsCoordinator::load_dashboard_settings(Some(&storage)), settings);
        assert_eq!(SettingsCoordinator::load_dashboard_settings_from(Some(path.as_path()))?, settings);

        let _ = fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn test_unreadable_settings_file() -> Result<()> {
        let dir = env::temp_dir().join("railsim_settings_bad_test");
        fs::create_dir_all(&dir)?;
        let path = dir.join("settings.json");
        fs::write(&path, "{ not json")?;

        // An explicitly named file must be valid
        assert!(SettingsCoordinator::load_dashboard_settings_from(Some(path.as_path())).is_err());

        // The lenient open used for the default location falls back
        let storage = FileStorage::open_or_warn(&path);
        assert!(storage.is_none());
        assert_eq!(
            SettingsCoordinator::load_dashboard_settings(storage.as_ref().map(|s| s as &dyn Storage)),
            DashboardSettings::default()
        );

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }
}
