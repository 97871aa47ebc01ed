//! Saver configuration
//!
//! Controls which instances the engine walks and which it refuses to touch,
//! plus the preference key backing the enable flag.
//!
//! Configuration can be written in RON:
//!
//! ```ron
//! (
//!     capture_excluded_kinds: ["Transform", "MeshFilter", "Light"],
//!     restore_excluded_kinds: ["Transform"],
//!     include_inactive: true,
//!     skip_template_instances: true,
//!     enabled_key: "playsave.enabled",
//!     enabled_default: true,
//! )
//! ```

use crate::error::Result;
use crate::ObjectKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Preference key used for the enable flag unless configured otherwise
pub const DEFAULT_ENABLED_KEY: &str = "playsave.enabled";

/// Configuration for a [`PlayModeSaver`](crate::PlayModeSaver)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaverConfig {
    /// Kinds never captured
    pub capture_excluded_kinds: Vec<ObjectKind>,
    /// Kinds never restored, even when a snapshot exists
    pub restore_excluded_kinds: Vec<ObjectKind>,
    /// Walk inactive instances as well as active ones
    pub include_inactive: bool,
    /// Skip instances that belong to template assets or template instances
    pub skip_template_instances: bool,
    /// Preference key of the enable flag
    pub enabled_key: String,
    /// Value of the enable flag when the preference was never written
    pub enabled_default: bool,
}

impl SaverConfig {
    /// Parse a configuration from RON text
    ///
    /// Missing fields take their default values.
    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Add a kind to the capture exclusion set
    pub fn exclude_from_capture(mut self, kind: impl Into<ObjectKind>) -> Self {
        let kind = kind.into();
        if !self.capture_excluded_kinds.contains(&kind) {
            self.capture_excluded_kinds.push(kind);
        }
        self
    }
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            capture_excluded_kinds: vec![
                ObjectKind::TRANSFORM.into(),
                ObjectKind::MESH_FILTER.into(),
                ObjectKind::MESH_RENDERER.into(),
                ObjectKind::SKINNED_MESH_RENDERER.into(),
                ObjectKind::AVATAR_DESCRIPTOR.into(),
            ],
            restore_excluded_kinds: vec![ObjectKind::TRANSFORM.into()],
            include_inactive: true,
            skip_template_instances: true,
            enabled_key: DEFAULT_ENABLED_KEY.to_string(),
            enabled_default: true,
        }
    }
}
