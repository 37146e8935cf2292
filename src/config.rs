//! Glance configuration persistence
//!
//! Stores user preferences in `~/.config/glance/config.yaml`. The
//! synchronizer never caches a config: every settings pass re-reads the
//! current snapshot from a [`SharedConfig`].

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::placement::{DiffConfig, PlacementConfig};

/// Overview panel configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlanceConfig {
    /// Comma separated file extensions that never get an overview panel
    pub disable_language_suffix: String,
    /// Mount panels on the trailing edge instead of the leading edge
    pub right_aligned: bool,
    /// Mount panels in two-side diff viewers
    pub diff_two_side: bool,
    /// Mount panels in three-side (merge) diff viewers
    pub diff_three_side: bool,
    /// Also mount a panel on the middle surface of three-side viewers
    pub diff_three_side_middle: bool,
    /// Hide the editor's own scrollbar while a panel is mounted
    pub hide_original_scroll_bar: bool,
}

impl Default for GlanceConfig {
    fn default() -> Self {
        Self {
            disable_language_suffix: String::new(),
            right_aligned: true,
            diff_two_side: true,
            diff_three_side: true,
            diff_three_side_middle: false,
            hide_original_scroll_bar: true,
        }
    }
}

impl GlanceConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// The disabled extension set, trimmed, empty entries dropped
    pub fn disabled_extensions(&self) -> HashSet<String> {
        self.disable_language_suffix
            .split(',')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Placement inputs for the resolver
    pub fn placement(&self) -> PlacementConfig {
        PlacementConfig {
            align_right: self.right_aligned,
            diff: DiffConfig {
                two_side: self.diff_two_side,
                three_side: self.diff_three_side,
                three_side_middle: self.diff_three_side_middle,
            },
        }
    }
}

/// Blank extensions are never disabled
pub fn is_extension_disabled(disabled: &HashSet<String>, extension: &str) -> bool {
    !extension.trim().is_empty() && disabled.contains(extension)
}

/// Live configuration shared between the settings store and the synchronizer
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Rc<RefCell<GlanceConfig>>,
}

impl SharedConfig {
    pub fn new(config: GlanceConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(config)),
        }
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> GlanceConfig {
        self.inner.borrow().clone()
    }

    /// Replace the whole configuration
    pub fn replace(&self, config: GlanceConfig) {
        *self.inner.borrow_mut() = config;
    }

    /// Modify the configuration in place
    pub fn update(&self, f: impl FnOnce(&mut GlanceConfig)) {
        f(&mut self.inner.borrow_mut());
    }
}
