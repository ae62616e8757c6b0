pub mod file;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

// Engine-reserved setting ids. Games start their own at FIRST_GAME_SETTING.
pub const SETTING_MUSIC_VOLUME: u32 = 0;
pub const SETTING_SOUND_VOLUME: u32 = 1;
pub const SETTING_FULLSCREEN: u32 = 2;
pub const SETTING_RESOLUTION_WIDTH: u32 = 3;
pub const SETTING_RESOLUTION_HEIGHT: u32 = 4;
pub const FIRST_GAME_SETTING: u32 = 100;

/// Build identity: (major, minor, build hash). A settings file from a
/// different build is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildVersion(pub u32, pub u32, pub u32);

/// A typed setting value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Int(i32),
    Float(f32),
    Bool(bool),
}

impl SettingValue {
    fn same_type(&self, other: &SettingValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Debug, Clone)]
struct SettingEntry {
    description: String,
    value: SettingValue,
    default: SettingValue,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Registered settings with typed access and text-file persistence.
/// Values loaded from disk only apply when their type matches the
/// registered entry; everything else falls back to defaults.
pub struct Settings {
    entries: BTreeMap<u32, SettingEntry>,
    version: BuildVersion,
    path: Option<PathBuf>,
}

impl Settings {
    pub fn new(version: BuildVersion) -> Self {
        Self {
            entries: BTreeMap::new(),
            version,
            path: None,
        }
    }

    /// Standard settings location: `<config dir>/<app_name>.conf`.
    pub fn default_path(app_name: &str) -> Result<PathBuf, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(dir.join(format!("{}.conf", app_name)))
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Register a setting. Re-registering keeps the current value if the
    /// type still matches.
    pub fn register(&mut self, id: u32, description: &str, default: SettingValue) {
        match self.entries.get_mut(&id) {
            Some(entry) if entry.value.same_type(&default) => {
                entry.description = description.to_string();
                entry.default = default;
            }
            _ => {
                self.entries.insert(
                    id,
                    SettingEntry {
                        description: description.to_string(),
                        value: default,
                        default,
                    },
                );
            }
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: u32) -> Option<SettingValue> {
        self.entries.get(&id).map(|e| e.value)
    }

    pub fn get_int(&self, id: u32) -> i32 {
        match self.get(id) {
            Some(SettingValue::Int(v)) => v,
            other => {
                log::error!("setting {} is not an int (found {:?})", id, other);
                0
            }
        }
    }

    pub fn get_float(&self, id: u32) -> f32 {
        match self.get(id) {
            Some(SettingValue::Float(v)) => v,
            other => {
                log::error!("setting {} is not a float (found {:?})", id, other);
                0.0
            }
        }
    }

    pub fn get_bool(&self, id: u32) -> bool {
        match self.get(id) {
            Some(SettingValue::Bool(v)) => v,
            other => {
                log::error!("setting {} is not a bool (found {:?})", id, other);
                false
            }
        }
    }

    /// Set a value; the type must match the registered entry.
    pub fn set(&mut self, id: u32, value: SettingValue) {
        match self.entries.get_mut(&id) {
            Some(entry) if entry.value.same_type(&value) => entry.value = value,
            Some(entry) => log::error!(
                "setting {} type mismatch: {:?} vs registered {:?}",
                id,
                value,
                entry.value
            ),
            None => log::error!("setting {} is not registered", id),
        }
    }

    pub fn set_int(&mut self, id: u32, value: i32) {
        self.set(id, SettingValue::Int(value));
    }

    pub fn set_float(&mut self, id: u32, value: f32) {
        self.set(id, SettingValue::Float(value));
    }

    pub fn set_bool(&mut self, id: u32, value: bool) {
        self.set(id, SettingValue::Bool(value));
    }

    pub fn reset_to_defaults(&mut self) {
        for entry in self.entries.values_mut() {
            entry.value = entry.default;
        }
    }

    /// Read the settings file. Returns `Ok(true)` when stored values were
    /// applied, `Ok(false)` when the file was missing or from another
    /// build (defaults stay in place).
    pub fn load(&mut self) -> Result<bool, SettingsError> {
        let Some(path) = self.path.clone() else {
            return Ok(false);
        };
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        let Some(stored) = file::parse(&text, self.version) else {
            return Ok(false);
        };
        for (id, value) in stored {
            match self.entries.get_mut(&id) {
                Some(entry) if entry.value.same_type(&value) => entry.value = value,
                Some(_) => log::warn!("stored setting {} has wrong type, keeping default", id),
                None => log::debug!("stored setting {} is no longer registered", id),
            }
        }
        Ok(true)
    }

    /// Write all registered settings to the file.
    pub fn save(&self, app_name: &str) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = file::serialize(
            app_name,
            self.version,
            self.entries
                .iter()
                .map(|(&id, e)| (id, e.description.as_str(), e.value)),
        );
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: BuildVersion = BuildVersion(1, 2, 777);

    fn registered() -> Settings {
        let mut settings = Settings::new(VERSION);
        settings.register(SETTING_MUSIC_VOLUME, "Music volume", SettingValue::Float(1.0));
        settings.register(SETTING_FULLSCREEN, "Fullscreen", SettingValue::Bool(false));
        settings.register(FIRST_GAME_SETTING, "Lives", SettingValue::Int(3));
        settings
    }

    #[test]
    fn typed_getters_and_setters() {
        let mut settings = registered();
        assert_eq!(settings.get_int(FIRST_GAME_SETTING), 3);
        settings.set_float(SETTING_MUSIC_VOLUME, 0.25);
        assert_eq!(settings.get_float(SETTING_MUSIC_VOLUME), 0.25);

        // Wrong type: value unchanged.
        settings.set_int(SETTING_MUSIC_VOLUME, 5);
        assert_eq!(settings.get_float(SETTING_MUSIC_VOLUME), 0.25);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.conf");

        let mut settings = registered();
        settings.set_path(path.clone());
        settings.set_float(SETTING_MUSIC_VOLUME, 0.5);
        settings.set_bool(SETTING_FULLSCREEN, true);
        settings.save("game").unwrap();

        let mut fresh = registered();
        fresh.set_path(path);
        assert!(fresh.load().unwrap());
        assert_eq!(fresh.get_float(SETTING_MUSIC_VOLUME), 0.5);
        assert!(fresh.get_bool(SETTING_FULLSCREEN));
        assert_eq!(fresh.get_int(FIRST_GAME_SETTING), 3);
    }

    #[test]
    fn other_build_version_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.conf");

        let mut settings = registered();
        settings.set_path(path.clone());
        settings.set_float(SETTING_MUSIC_VOLUME, 0.1);
        settings.save("game").unwrap();

        let mut fresh = Settings::new(BuildVersion(1, 2, 778));
        fresh.register(SETTING_MUSIC_VOLUME, "Music volume", SettingValue::Float(1.0));
        fresh.set_path(path);
        assert!(!fresh.load().unwrap());
        assert_eq!(fresh.get_float(SETTING_MUSIC_VOLUME), 1.0);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = registered();
        settings.set_path(dir.path().join("absent.conf"));
        assert!(!settings.load().unwrap());
    }
}
