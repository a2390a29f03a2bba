// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};

use anywho::{Error, anywho};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Client configuration, persisted as RON under the platform config
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WildConfig {
    /// Base address every catalog request is made against.
    pub base_url: String,
    /// How many references a listing page requests.
    pub page_size: usize,
}

impl Default for WildConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.wilddex.dev/v2/".to_string(),
            page_size: 20,
        }
    }
}

impl WildConfig {
    /// Loads the saved configuration for `app_id`, falling back to defaults
    /// when there is nothing saved or the file cannot be read.
    pub fn load(app_id: &str) -> WildConfig {
        match Self::config_path(app_id) {
            Some(path) => Self::load_from(&path),
            None => WildConfig::default(),
        }
    }

    /// Loads the configuration from an explicit path, falling back to
    /// defaults on any failure.
    pub fn load_from(path: &Path) -> WildConfig {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return WildConfig::default(),
        };

        ron::from_str(&raw).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "unreadable config, using defaults");
            WildConfig::default()
        })
    }

    /// Persists the configuration for `app_id`.
    pub fn save(&self, app_id: &str) -> Result<(), Error> {
        let path =
            Self::config_path(app_id).ok_or_else(|| anywho!("no config directory available"))?;
        self.save_to(&path)
    }

    /// Persists the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, ron::to_string(self)?)?;
        Ok(())
    }

    fn config_path(app_id: &str) -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(app_id).join("config.ron"))
    }
}
