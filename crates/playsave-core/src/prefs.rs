//! Key-value preference storage backing the enable flag

use crate::error::Result;
use std::collections::HashMap;

/// Boolean preference storage provided by the host
pub trait Preferences {
    /// Read a flag, falling back to `default` when it was never written
    fn get_bool(&self, key: &str, default: bool) -> bool;

    /// Write a flag
    fn set_bool(&mut self, key: &str, value: bool) -> Result<()>;
}

/// Non-persistent preferences, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, bool>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

impl<P: Preferences + ?Sized> Preferences for Box<P> {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        (**self).get_bool(key, default)
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        (**self).set_bool(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_key_uses_default() {
        let prefs = MemoryPreferences::new();
        assert!(prefs.get_bool("playsave.enabled", true));
        assert!(!prefs.get_bool("playsave.enabled", false));
    }

    #[test]
    fn test_set_overrides_default() {
        let mut prefs = MemoryPreferences::new();
        prefs.set_bool("playsave.enabled", false).unwrap();
        assert!(!prefs.get_bool("playsave.enabled", true));
    }

    #[test]
    fn test_boxed_preferences() {
        let mut prefs: Box<dyn Preferences> = Box::new(MemoryPreferences::new());
        prefs.set_bool("flag", true).unwrap();
        assert!(prefs.get_bool("flag", false));
    }
}
