//! RON file preference store.

use crate::error::{Error, Result};
use playsave_core::Preferences;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk layout of the preference file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPrefs {
    #[serde(default)]
    flags: BTreeMap<String, bool>,
}

/// Preference store persisted to a RON file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    prefs: StoredPrefs,
}

impl FilePreferences {
    /// Open the preference file at `path`, starting empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let prefs = if path.exists() {
            let content = fs::read_to_string(&path)?;
            ron::from_str(&content)?
        } else {
            debug!(path = %path.display(), "preference file not found, starting empty");
            StoredPrefs::default()
        };
        Ok(Self { path, prefs })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a flag without a default.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.prefs.flags.get(key).copied()
    }

    /// Write a flag and persist the file.
    pub fn set_flag(&mut self, key: &str, value: bool) -> Result<()> {
        self.prefs.flags.insert(key.to_string(), value);
        self.save()
    }

    /// Remove a flag and persist the file.
    pub fn remove_flag(&mut self, key: &str) -> Result<Option<bool>> {
        let removed = self.prefs.flags.remove(key);
        self.save()?;
        Ok(removed)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = ron::ser::to_string_pretty(&self.prefs, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Preferences for FilePreferences {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.flag(key).unwrap_or(default)
    }

    fn set_bool(&mut self, key: &str, value: bool) -> playsave_core::Result<()> {
        Ok(self.set_flag(key, value)?)
    }
}
